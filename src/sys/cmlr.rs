// jvmti-agent/src/sys/cmlr.rs
//
// The jvmticmlr.h structures. A JIT compiler attaches a chain of these
// records to the `compile_info` argument of a Compiled Method Load event
// to describe inlined frames per native pc.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(dead_code)]

use std::os::raw::{c_char, c_void};

use crate::sys::jni::{jint, jmethodID};

pub type jvmtiCMLRKind = u32;

pub const JVMTI_CMLR_DUMMY: jvmtiCMLRKind = 1;
pub const JVMTI_CMLR_INLINE_INFO: jvmtiCMLRKind = 2;

pub const JVMTI_CMLR_MAJOR_VERSION_1: jint = 0x00000001;
pub const JVMTI_CMLR_MINOR_VERSION_0: jint = 0x00000000;
pub const JVMTI_CMLR_MAJOR_VERSION: jint = 0x00000001;
pub const JVMTI_CMLR_MINOR_VERSION: jint = 0x00000000;

/// Common prefix of every record in the chain. `kind` tells which full
/// record struct the header starts, `next` links to the following record
/// or is null at the end.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct jvmtiCompiledMethodLoadRecordHeader {
    pub kind: jvmtiCMLRKind,
    pub majorinfoversion: jint,
    pub minorinfoversion: jint,
    pub next: *mut jvmtiCompiledMethodLoadRecordHeader,
}

/// The stack at one native pc: parallel arrays of method ids and bytecode
/// indices, innermost frame first.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct PCStackInfo {
    pub pc: *mut c_void,
    pub numstackframes: jint,
    pub methods: *mut jmethodID,
    pub bcis: *mut jint,
}

#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct jvmtiCompiledMethodLoadInlineRecord {
    pub header: jvmtiCompiledMethodLoadRecordHeader,
    pub numpcs: jint,
    pub pcinfo: *mut PCStackInfo,
}

#[repr(C)]
#[derive(Copy, Clone)]
pub struct jvmtiCompiledMethodLoadDummyRecord {
    pub header: jvmtiCompiledMethodLoadRecordHeader,
    pub message: [c_char; 50],
}
