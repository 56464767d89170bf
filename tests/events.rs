use std::os::raw::{c_char, c_uchar, c_void};
use std::ptr;
use std::sync::Mutex;

use jvmti_agent::env::{JClass, JLocation, JMethodId, JThread, Jvm, JvmtiEnv};
use jvmti_agent::records::{AddressLocationEntry, CompiledMethodLoadRecord, StackFrame, StackInfo};
use jvmti_agent::sys::{cmlr, jni, jvmti};
use jvmti_agent::{set_global_agent, Agent, EventSettings};

// One recording agent serves the whole test binary; each test drives its
// own events and reads its own log.

static VM_INIT_THREADS: Mutex<Vec<usize>> = Mutex::new(Vec::new());
static EXCEPTION_CATCH_SITES: Mutex<Vec<Option<usize>>> = Mutex::new(Vec::new());
static FRAME_POP_FLAGS: Mutex<Vec<bool>> = Mutex::new(Vec::new());
static MONITOR_WAITED_FLAGS: Mutex<Vec<bool>> = Mutex::new(Vec::new());
static CLASS_HOOK_CALLS: Mutex<Vec<(bool, jni::jint)>> = Mutex::new(Vec::new());
static COMPILED_LOADS: Mutex<
    Vec<(
        usize,
        usize,
        usize,
        Option<Vec<AddressLocationEntry>>,
        Option<Vec<CompiledMethodLoadRecord>>,
    )>,
> = Mutex::new(Vec::new());
static DYNAMIC_CODE: Mutex<Vec<(String, usize, usize)>> = Mutex::new(Vec::new());
static EXHAUSTIONS: Mutex<Vec<(jni::jint, Option<String>)>> = Mutex::new(Vec::new());
static FREED_TAGS: Mutex<Vec<i64>> = Mutex::new(Vec::new());

struct RecordingAgent;

impl Agent for RecordingAgent {
    fn on_load(&self, _vm: &Jvm, _options: Option<&str>) -> jni::jint {
        jni::JNI_OK
    }

    fn vm_init(&self, _env: &mut JvmtiEnv, _jni_env: *mut jni::JNIEnv, thread: JThread) {
        VM_INIT_THREADS.lock().unwrap().push(thread.as_raw() as usize);
    }

    fn class_file_load_hook(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        class_being_redefined: Option<JClass>,
        _loader: jni::jobject,
        _name: *const c_char,
        _protection_domain: jni::jobject,
        class_data_len: jni::jint,
        _class_data: *const c_uchar,
        new_class_data_len: *mut jni::jint,
        _new_class_data: *mut *mut c_uchar,
    ) {
        CLASS_HOOK_CALLS
            .lock()
            .unwrap()
            .push((class_being_redefined.is_some(), class_data_len));
        if !new_class_data_len.is_null() {
            unsafe {
                *new_class_data_len = 7;
            }
        }
    }

    fn exception(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        _thread: JThread,
        _method: JMethodId,
        _location: JLocation,
        _exception: jni::jobject,
        catch_method: Option<JMethodId>,
        _catch_location: JLocation,
    ) {
        EXCEPTION_CATCH_SITES
            .lock()
            .unwrap()
            .push(catch_method.map(|m| m.as_raw() as usize));
    }

    fn frame_pop(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        _thread: JThread,
        _method: JMethodId,
        was_popped_by_exception: bool,
    ) {
        FRAME_POP_FLAGS.lock().unwrap().push(was_popped_by_exception);
    }

    fn compiled_method_load(
        &self,
        _env: &mut JvmtiEnv,
        method: JMethodId,
        code_addr: usize,
        code_size: usize,
        address_locations: Option<&[AddressLocationEntry]>,
        compile_infos: Option<&[CompiledMethodLoadRecord]>,
    ) {
        COMPILED_LOADS.lock().unwrap().push((
            method.as_raw() as usize,
            code_addr,
            code_size,
            address_locations.map(|entries| entries.to_vec()),
            compile_infos.map(|records| records.to_vec()),
        ));
    }

    fn dynamic_code_generated(&self, _env: &mut JvmtiEnv, name: &str, address: usize, length: usize) {
        DYNAMIC_CODE.lock().unwrap().push((name.to_string(), address, length));
    }

    fn monitor_waited(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        _thread: JThread,
        _object: jni::jobject,
        timed_out: bool,
    ) {
        MONITOR_WAITED_FLAGS.lock().unwrap().push(timed_out);
    }

    fn resource_exhausted(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        flags: jni::jint,
        description: Option<&str>,
    ) {
        EXHAUSTIONS
            .lock()
            .unwrap()
            .push((flags, description.map(|d| d.to_string())));
    }

    fn object_free(&self, _env: &mut JvmtiEnv, tag: i64) {
        if tag == 42 {
            panic!("tag 42 is cursed");
        }
        FREED_TAGS.lock().unwrap().push(tag);
    }
}

fn install_recording_agent() {
    let _ = set_global_agent(Box::new(RecordingAgent));
}

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
fn enabled_slots_reach_the_agent() {
    install_recording_agent();
    let mut settings = EventSettings::new();
    settings.enable_vm_init(true);
    let callbacks = settings.callbacks();
    assert!(callbacks.ObjectFree.is_none());

    unsafe {
        callbacks.VMInit.unwrap()(ptr::null_mut(), ptr::null_mut(), 0x7A00 as jni::jthread);
    }
    assert_eq!(*VM_INIT_THREADS.lock().unwrap(), vec![0x7A00]);
}

#[test]
fn compiled_method_loads_arrive_decoded() {
    install_recording_agent();
    let mut settings = EventSettings::new();
    settings.enable_compiled_method_load(true);
    let callbacks = settings.callbacks();

    let map = [
        jvmti::jvmtiAddrLocationMap { start_address: 0x4000 as *const c_void, location: 0 },
        jvmti::jvmtiAddrLocationMap { start_address: 0x4010 as *const c_void, location: 3 },
    ];
    let mut dummy = cmlr::jvmtiCompiledMethodLoadDummyRecord {
        header: header(cmlr::JVMTI_CMLR_DUMMY, ptr::null_mut()),
        message: [0 as c_char; 50],
    };
    let mut methods = [0x10 as jni::jmethodID];
    let mut bcis = [12 as jni::jint];
    let mut pcinfo = [cmlr::PCStackInfo {
        pc: 0x4008 as *mut c_void,
        numstackframes: 1,
        methods: methods.as_mut_ptr(),
        bcis: bcis.as_mut_ptr(),
    }];
    let inline = cmlr::jvmtiCompiledMethodLoadInlineRecord {
        header: header(cmlr::JVMTI_CMLR_INLINE_INFO, &mut dummy.header),
        numpcs: 1,
        pcinfo: pcinfo.as_mut_ptr(),
    };

    unsafe {
        callbacks.CompiledMethodLoad.unwrap()(
            ptr::null_mut(),
            0x99 as jni::jmethodID,
            256,
            0x4000 as *const c_void,
            map.len() as jni::jint,
            map.as_ptr(),
            &inline as *const _ as *const c_void,
        );
    }

    let loads = COMPILED_LOADS.lock().unwrap();
    let (_, code_addr, code_size, locations, infos) =
        loads.iter().find(|load| load.0 == 0x99).unwrap();
    assert_eq!(*code_addr, 0x4000);
    assert_eq!(*code_size, 256);
    assert_eq!(
        *locations,
        Some(vec![
            AddressLocationEntry { start_address: 0x4000, location: 0 },
            AddressLocationEntry { start_address: 0x4010, location: 3 },
        ])
    );
    assert_eq!(
        *infos,
        Some(vec![
            CompiledMethodLoadRecord::Inline {
                stack_infos: vec![StackInfo {
                    pc_address: 0x4008,
                    stack_frames: vec![StackFrame {
                        method_id: JMethodId::from_raw(0x10 as jni::jmethodID),
                        byte_code_index: 12,
                    }],
                }],
            },
            CompiledMethodLoadRecord::Dummy,
        ])
    );
}

#[test]
fn compiled_method_loads_without_payloads_pass_none() {
    install_recording_agent();
    let mut settings = EventSettings::new();
    settings.enable_compiled_method_load(true);
    let callbacks = settings.callbacks();

    unsafe {
        callbacks.CompiledMethodLoad.unwrap()(
            ptr::null_mut(),
            0xAB as jni::jmethodID,
            64,
            0x5000 as *const c_void,
            0,
            ptr::null(),
            ptr::null(),
        );
    }

    let loads = COMPILED_LOADS.lock().unwrap();
    let bare = loads.iter().find(|load| load.0 == 0xAB).unwrap();
    assert_eq!(bare.3, None);
    assert_eq!(bare.4, None);
}

#[test]
fn dynamic_code_names_are_decoded() {
    install_recording_agent();
    let mut settings = EventSettings::new();
    settings.enable_dynamic_code_generated(true);
    let callbacks = settings.callbacks();
    let slot = callbacks.DynamicCodeGenerated.unwrap();

    let mut name = "Lambda§stub".as_bytes().to_vec();
    name.push(0);
    unsafe {
        slot(ptr::null_mut(), name.as_ptr() as *const c_char, 0x6000 as *const c_void, 128);
    }
    assert_eq!(
        *DYNAMIC_CODE.lock().unwrap(),
        vec![("Lambda§stub".to_string(), 0x6000, 128)]
    );

    // A lone high surrogate is not decodable; the event is dropped.
    let broken: [u8; 4] = [0xED, 0xA0, 0x81, 0x00];
    unsafe {
        slot(ptr::null_mut(), broken.as_ptr() as *const c_char, 0x6100 as *const c_void, 16);
    }
    assert_eq!(DYNAMIC_CODE.lock().unwrap().len(), 1);
}

#[test]
fn exceptions_report_their_catch_site() {
    install_recording_agent();
    let mut settings = EventSettings::new();
    settings.enable_exception(true);
    let callbacks = settings.callbacks();
    let slot = callbacks.Exception.unwrap();

    unsafe {
        slot(
            ptr::null_mut(),
            ptr::null_mut(),
            ptr::null_mut(),
            0x11 as jni::jmethodID,
            8,
            ptr::null_mut(),
            ptr::null_mut(),
            0,
        );
        slot(
            ptr::null_mut(),
            ptr::null_mut(),
            ptr::null_mut(),
            0x11 as jni::jmethodID,
            8,
            ptr::null_mut(),
            0x33 as jni::jmethodID,
            40,
        );
    }
    assert_eq!(*EXCEPTION_CATCH_SITES.lock().unwrap(), vec![None, Some(0x33)]);
}

#[test]
fn class_data_out_parameters_pass_through() {
    install_recording_agent();
    let mut settings = EventSettings::new();
    settings.enable_class_file_load_hook(true);
    let callbacks = settings.callbacks();

    let class_data = [0xCAu8, 0xFE, 0xBA, 0xBE];
    let name = b"com/example/Foo\0";
    let mut new_class_data_len: jni::jint = 0;
    let mut new_class_data: *mut c_uchar = ptr::null_mut();
    unsafe {
        callbacks.ClassFileLoadHook.unwrap()(
            ptr::null_mut(),
            ptr::null_mut(),
            ptr::null_mut(),
            ptr::null_mut(),
            name.as_ptr() as *const c_char,
            ptr::null_mut(),
            class_data.len() as jni::jint,
            class_data.as_ptr(),
            &mut new_class_data_len,
            &mut new_class_data,
        );
    }
    assert_eq!(*CLASS_HOOK_CALLS.lock().unwrap(), vec![(false, 4)]);
    assert_eq!(new_class_data_len, 7);
    assert!(new_class_data.is_null());
}

#[test]
fn jbooleans_decode_to_bools() {
    install_recording_agent();
    let mut settings = EventSettings::new();
    settings.enable_frame_pop(true).enable_monitor_waited(true);
    let callbacks = settings.callbacks();

    unsafe {
        callbacks.FramePop.unwrap()(
            ptr::null_mut(),
            ptr::null_mut(),
            ptr::null_mut(),
            0x11 as jni::jmethodID,
            1,
        );
        callbacks.MonitorWaited.unwrap()(
            ptr::null_mut(),
            ptr::null_mut(),
            ptr::null_mut(),
            ptr::null_mut(),
            0,
        );
    }
    assert_eq!(*FRAME_POP_FLAGS.lock().unwrap(), vec![true]);
    assert_eq!(*MONITOR_WAITED_FLAGS.lock().unwrap(), vec![false]);
}

#[test]
fn resource_exhausted_descriptions_are_optional() {
    install_recording_agent();
    let mut settings = EventSettings::new();
    settings.enable_resource_exhausted(true);
    let callbacks = settings.callbacks();
    let slot = callbacks.ResourceExhausted.unwrap();

    let flags = jvmti::JVMTI_RESOURCE_EXHAUSTED_OOM_ERROR | jvmti::JVMTI_RESOURCE_EXHAUSTED_JAVA_HEAP;
    let description = b"Java heap space\0";
    unsafe {
        slot(ptr::null_mut(), ptr::null_mut(), flags, ptr::null(), ptr::null());
        slot(
            ptr::null_mut(),
            ptr::null_mut(),
            flags,
            ptr::null(),
            description.as_ptr() as *const c_char,
        );
    }
    assert_eq!(
        *EXHAUSTIONS.lock().unwrap(),
        vec![(flags, None), (flags, Some("Java heap space".to_string()))]
    );
}

#[test]
fn panics_in_handlers_do_not_cross_the_callback() {
    install_recording_agent();
    let mut settings = EventSettings::new();
    settings.enable_object_free(true);
    let callbacks = settings.callbacks();
    let slot = callbacks.ObjectFree.unwrap();

    unsafe {
        slot(ptr::null_mut(), 42);
        slot(ptr::null_mut(), 7);
    }
    assert_eq!(*FREED_TAGS.lock().unwrap(), vec![7]);
}
