// jvmti-agent/src/records.rs
//
// Decoded forms of the jvmticmlr.h records attached to compiled method
// load events, and of the address location map. The raw data is only
// valid for the duration of the callback, so everything is copied out
// eagerly.

use std::os::raw::c_void;
use std::slice;

use crate::env::{JLocation, JMethodId};
use crate::sys::{cmlr, jni, jvmti};

/// One entry of the map from native code addresses to bytecode locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressLocationEntry {
    pub start_address: usize,
    pub location: JLocation,
}

/// A native pc together with the virtual call frames inlined at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackInfo {
    pub pc_address: usize,
    pub stack_frames: Vec<StackFrame>,
}

/// One virtual frame: the method and the bytecode index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackFrame {
    pub method_id: JMethodId,
    pub byte_code_index: i32,
}

/// A record decoded from the compile information chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledMethodLoadRecord {
    Inline { stack_infos: Vec<StackInfo> },
    Dummy,
}

/// Copies the address location map of a compiled method load event.
/// `None` when the VM supplied no map.
///
/// # Safety
///
/// `map` must point to `map_length` valid entries or be null.
pub unsafe fn to_address_locations(
    map_length: jni::jint,
    map: *const jvmti::jvmtiAddrLocationMap,
) -> Option<Vec<AddressLocationEntry>> {
    if map.is_null() || map_length <= 0 {
        return None;
    }
    let entries = slice::from_raw_parts(map, map_length as usize);
    Some(
        entries
            .iter()
            .map(|e| AddressLocationEntry {
                start_address: e.start_address as usize,
                location: e.location,
            })
            .collect(),
    )
}

/// Walks the record chain hung off a compiled method load event's
/// `compile_info` argument. `None` when the VM supplied no records.
/// Records of an unknown kind or of a version other than the one this
/// crate was built against are skipped.
///
/// # Safety
///
/// `compile_info` must point to a record chain as laid out by
/// jvmticmlr.h or be null.
pub unsafe fn to_compile_infos(compile_info: *const c_void) -> Option<Vec<CompiledMethodLoadRecord>> {
    if compile_info.is_null() {
        return None;
    }
    let mut records = Vec::new();
    let mut header = compile_info as *const cmlr::jvmtiCompiledMethodLoadRecordHeader;
    while !header.is_null() {
        let record = &*header;
        if record.majorinfoversion == cmlr::JVMTI_CMLR_MAJOR_VERSION
            && record.minorinfoversion == cmlr::JVMTI_CMLR_MINOR_VERSION
        {
            match record.kind {
                cmlr::JVMTI_CMLR_DUMMY => records.push(CompiledMethodLoadRecord::Dummy),
                cmlr::JVMTI_CMLR_INLINE_INFO => {
                    let inline = &*(header as *const cmlr::jvmtiCompiledMethodLoadInlineRecord);
                    records.push(CompiledMethodLoadRecord::Inline {
                        stack_infos: to_stack_infos(inline.numpcs, inline.pcinfo),
                    });
                }
                _ => {}
            }
        }
        header = record.next;
    }
    Some(records)
}

unsafe fn to_stack_infos(numpcs: jni::jint, pcinfo: *mut cmlr::PCStackInfo) -> Vec<StackInfo> {
    if pcinfo.is_null() || numpcs <= 0 {
        return Vec::new();
    }
    slice::from_raw_parts(pcinfo, numpcs as usize)
        .iter()
        .map(|info| StackInfo {
            pc_address: info.pc as usize,
            stack_frames: to_stack_frames(info.numstackframes, info.methods, info.bcis),
        })
        .collect()
}

unsafe fn to_stack_frames(
    numstackframes: jni::jint,
    methods: *mut jni::jmethodID,
    bcis: *mut jni::jint,
) -> Vec<StackFrame> {
    if methods.is_null() || bcis.is_null() || numstackframes <= 0 {
        return Vec::new();
    }
    let methods = slice::from_raw_parts(methods, numstackframes as usize);
    let bcis = slice::from_raw_parts(bcis, numstackframes as usize);
    methods
        .iter()
        .zip(bcis.iter())
        .map(|(method, bci)| StackFrame {
            method_id: JMethodId::from_raw(*method),
            byte_code_index: *bci,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::raw::c_char;
    use std::ptr;

    fn header(
        kind: cmlr::jvmtiCMLRKind,
        next: *mut cmlr::jvmtiCompiledMethodLoadRecordHeader,
    ) -> cmlr::jvmtiCompiledMethodLoadRecordHeader {
        cmlr::jvmtiCompiledMethodLoadRecordHeader {
            kind,
            majorinfoversion: cmlr::JVMTI_CMLR_MAJOR_VERSION,
            minorinfoversion: cmlr::JVMTI_CMLR_MINOR_VERSION,
            next,
        }
    }

    #[test]
    fn missing_compile_info_is_none() {
        assert_eq!(unsafe { to_compile_infos(ptr::null()) }, None);
    }

    #[test]
    fn missing_address_location_map_is_none() {
        assert_eq!(unsafe { to_address_locations(3, ptr::null()) }, None);
        let entry = jvmti::jvmtiAddrLocationMap { start_address: 0x1000 as *const _, location: 7 };
        assert_eq!(unsafe { to_address_locations(0, &entry) }, None);
    }

    #[test]
    fn address_location_map_is_copied() {
        let entries = [
            jvmti::jvmtiAddrLocationMap { start_address: 0x1000 as *const _, location: 0 },
            jvmti::jvmtiAddrLocationMap { start_address: 0x1040 as *const _, location: 12 },
        ];
        let decoded = unsafe { to_address_locations(entries.len() as jni::jint, entries.as_ptr()) };
        assert_eq!(
            decoded,
            Some(vec![
                AddressLocationEntry { start_address: 0x1000, location: 0 },
                AddressLocationEntry { start_address: 0x1040, location: 12 },
            ])
        );
    }

    #[test]
    fn dummy_records_decode() {
        let mut dummy = cmlr::jvmtiCompiledMethodLoadDummyRecord {
            header: header(cmlr::JVMTI_CMLR_DUMMY, ptr::null_mut()),
            message: [0 as c_char; 50],
        };
        let decoded = unsafe { to_compile_infos(&mut dummy as *mut _ as *const c_void) };
        assert_eq!(decoded, Some(vec![CompiledMethodLoadRecord::Dummy]));
    }

    #[test]
    fn inline_records_carry_their_frames() {
        let mut methods = [0x10 as jni::jmethodID, 0x20 as jni::jmethodID];
        let mut bcis = [3 as jni::jint, 45 as jni::jint];
        let mut pcinfo = [cmlr::PCStackInfo {
            pc: 0x7f00 as *mut c_void,
            numstackframes: 2,
            methods: methods.as_mut_ptr(),
            bcis: bcis.as_mut_ptr(),
        }];
        let mut inline = cmlr::jvmtiCompiledMethodLoadInlineRecord {
            header: header(cmlr::JVMTI_CMLR_INLINE_INFO, ptr::null_mut()),
            numpcs: 1,
            pcinfo: pcinfo.as_mut_ptr(),
        };
        let decoded = unsafe { to_compile_infos(&mut inline as *mut _ as *const c_void) };
        assert_eq!(
            decoded,
            Some(vec![CompiledMethodLoadRecord::Inline {
                stack_infos: vec![StackInfo {
                    pc_address: 0x7f00,
                    stack_frames: vec![
                        StackFrame {
                            method_id: JMethodId::from_raw(0x10 as jni::jmethodID),
                            byte_code_index: 3,
                        },
                        StackFrame {
                            method_id: JMethodId::from_raw(0x20 as jni::jmethodID),
                            byte_code_index: 45,
                        },
                    ],
                }],
            }])
        );
    }

    #[test]
    fn record_chains_are_walked_in_order() {
        let mut second = cmlr::jvmtiCompiledMethodLoadDummyRecord {
            header: header(cmlr::JVMTI_CMLR_DUMMY, ptr::null_mut()),
            message: [0 as c_char; 50],
        };
        let mut first = cmlr::jvmtiCompiledMethodLoadInlineRecord {
            header: header(cmlr::JVMTI_CMLR_INLINE_INFO, &mut second.header),
            numpcs: 0,
            pcinfo: ptr::null_mut(),
        };
        let decoded = unsafe { to_compile_infos(&mut first as *mut _ as *const c_void) };
        assert_eq!(
            decoded,
            Some(vec![
                CompiledMethodLoadRecord::Inline { stack_infos: Vec::new() },
                CompiledMethodLoadRecord::Dummy,
            ])
        );
    }

    #[test]
    fn foreign_version_records_are_skipped() {
        let mut known = cmlr::jvmtiCompiledMethodLoadDummyRecord {
            header: header(cmlr::JVMTI_CMLR_DUMMY, ptr::null_mut()),
            message: [0 as c_char; 50],
        };
        let mut foreign = cmlr::jvmtiCompiledMethodLoadDummyRecord {
            header: cmlr::jvmtiCompiledMethodLoadRecordHeader {
                kind: cmlr::JVMTI_CMLR_DUMMY,
                majorinfoversion: cmlr::JVMTI_CMLR_MAJOR_VERSION + 1,
                minorinfoversion: cmlr::JVMTI_CMLR_MINOR_VERSION,
                next: &mut known.header,
            },
            message: [0 as c_char; 50],
        };
        let decoded = unsafe { to_compile_infos(&mut foreign as *mut _ as *const c_void) };
        assert_eq!(decoded, Some(vec![CompiledMethodLoadRecord::Dummy]));
    }

    #[test]
    fn unknown_kind_records_are_skipped() {
        let mut unknown = cmlr::jvmtiCompiledMethodLoadDummyRecord {
            header: header(99, ptr::null_mut()),
            message: [0 as c_char; 50],
        };
        let decoded = unsafe { to_compile_infos(&mut unknown as *mut _ as *const c_void) };
        assert_eq!(decoded, Some(Vec::new()));
    }
}
