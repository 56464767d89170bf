use std::mem::size_of;
use std::os::raw::{c_char, c_uchar, c_void};
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::Mutex;

use jvmti_agent::env::{
    ClassSignature, JClass, JMethodId, Jvm, JvmtiEnv, JvmtiVersion, LineNumberEntry, MethodName,
};
use jvmti_agent::error::{GetMethodNameError, JniError, JvmtiError};
use jvmti_agent::sys::{jni, jvmti};

// Each test builds a function table holding only the mocks it drives and
// wraps it the way the VM would hand the environment out. Mocks record
// into statics; the assertions stay in the test bodies.

fn empty_interface() -> jvmti::jvmtiInterface_1_ {
    unsafe { std::mem::zeroed() }
}

unsafe extern "system" fn deallocate_noop(
    _env: *mut jvmti::jvmtiEnv,
    _mem: *mut c_uchar,
) -> jvmti::jvmtiError {
    jvmti::jvmtiError::NONE
}

unsafe extern "system" fn report_version(
    _env: *mut jvmti::jvmtiEnv,
    version_ptr: *mut jni::jint,
) -> jvmti::jvmtiError {
    unsafe {
        *version_ptr = jvmti::JVMTI_VERSION;
    }
    jvmti::jvmtiError::NONE
}

#[test]
fn version_numbers_read_through_the_table() {
    let mut interface = empty_interface();
    interface.GetVersionNumber = Some(report_version);
    let mut env_struct = jvmti::jvmtiEnv { functions: &interface };
    let mut env = unsafe { JvmtiEnv::from_raw(&mut env_struct) };

    assert_eq!(env.get_version_number().unwrap(), jvmti::JVMTI_VERSION);
}

unsafe extern "system" fn refuse_capabilities(
    _env: *mut jvmti::jvmtiEnv,
    _capabilities_ptr: *const jvmti::jvmtiCapabilities,
) -> jvmti::jvmtiError {
    jvmti::jvmtiError::MUST_POSSESS_CAPABILITY
}

#[test]
fn error_codes_map_to_typed_errors() {
    let mut interface = empty_interface();
    interface.AddCapabilities = Some(refuse_capabilities);
    let mut env_struct = jvmti::jvmtiEnv { functions: &interface };
    let mut env = unsafe { JvmtiEnv::from_raw(&mut env_struct) };

    let result = env.add_capabilities(&jvmti::jvmtiCapabilities::default());
    assert!(matches!(result, Err(JvmtiError::MustPossessCapability)));
    assert_eq!(
        result.unwrap_err().to_string(),
        "This environment does not possess the required capability"
    );
}

static METHOD_NAME: &[u8] = b"doWork\0";
static METHOD_SIGNATURE: &[u8] = b"(I)V\0";
static METHOD_NAME_FREED: Mutex<Vec<usize>> = Mutex::new(Vec::new());

unsafe extern "system" fn write_method_name(
    _env: *mut jvmti::jvmtiEnv,
    _method: jni::jmethodID,
    name_ptr: *mut *mut c_char,
    signature_ptr: *mut *mut c_char,
    _generic_ptr: *mut *mut c_char,
) -> jvmti::jvmtiError {
    unsafe {
        *name_ptr = METHOD_NAME.as_ptr() as *mut c_char;
        *signature_ptr = METHOD_SIGNATURE.as_ptr() as *mut c_char;
    }
    jvmti::jvmtiError::NONE
}

unsafe extern "system" fn record_method_name_free(
    _env: *mut jvmti::jvmtiEnv,
    mem: *mut c_uchar,
) -> jvmti::jvmtiError {
    METHOD_NAME_FREED.lock().unwrap().push(mem as usize);
    jvmti::jvmtiError::NONE
}

#[test]
fn method_names_are_decoded_and_freed() {
    let mut interface = empty_interface();
    interface.GetMethodName = Some(write_method_name);
    interface.Deallocate = Some(record_method_name_free);
    let mut env_struct = jvmti::jvmtiEnv { functions: &interface };
    let mut env = unsafe { JvmtiEnv::from_raw(&mut env_struct) };

    let method = JMethodId::from_raw(0x10 as jni::jmethodID);
    let name = env.get_method_name(&method).unwrap();
    assert_eq!(
        name,
        MethodName {
            name: "doWork".to_string(),
            signature: "(I)V".to_string(),
            generic_signature: None,
        }
    );

    let mut freed = METHOD_NAME_FREED.lock().unwrap().clone();
    freed.sort();
    let mut expected = vec![METHOD_NAME.as_ptr() as usize, METHOD_SIGNATURE.as_ptr() as usize];
    expected.sort();
    assert_eq!(freed, expected);
}

static PARTIAL_NAME: &[u8] = b"lost\0";
static PARTIAL_FREED: Mutex<Vec<usize>> = Mutex::new(Vec::new());

unsafe extern "system" fn write_partial_name(
    _env: *mut jvmti::jvmtiEnv,
    _method: jni::jmethodID,
    name_ptr: *mut *mut c_char,
    _signature_ptr: *mut *mut c_char,
    _generic_ptr: *mut *mut c_char,
) -> jvmti::jvmtiError {
    unsafe {
        *name_ptr = PARTIAL_NAME.as_ptr() as *mut c_char;
    }
    jvmti::jvmtiError::NATIVE_METHOD
}

unsafe extern "system" fn record_partial_free(
    _env: *mut jvmti::jvmtiEnv,
    mem: *mut c_uchar,
) -> jvmti::jvmtiError {
    PARTIAL_FREED.lock().unwrap().push(mem as usize);
    jvmti::jvmtiError::NONE
}

// The VM can fill some out parameters before failing; what was written
// still has to go back to Deallocate.
#[test]
fn partial_results_are_freed_on_error() {
    let mut interface = empty_interface();
    interface.GetMethodName = Some(write_partial_name);
    interface.Deallocate = Some(record_partial_free);
    let mut env_struct = jvmti::jvmtiEnv { functions: &interface };
    let mut env = unsafe { JvmtiEnv::from_raw(&mut env_struct) };

    let method = JMethodId::from_raw(0x10 as jni::jmethodID);
    let result = env.get_method_name(&method);
    assert!(matches!(
        result,
        Err(GetMethodNameError::VmError(JvmtiError::NativeMethod))
    ));
    assert_eq!(*PARTIAL_FREED.lock().unwrap(), vec![PARTIAL_NAME.as_ptr() as usize]);
}

static CLASS_SIGNATURE: &[u8] = b"Ljava/util/List;\0";
static CLASS_GENERIC: &[u8] = b"<E:Ljava/lang/Object;>Ljava/lang/Object;\0";

unsafe extern "system" fn write_class_signature(
    _env: *mut jvmti::jvmtiEnv,
    _klass: jni::jclass,
    signature_ptr: *mut *mut c_char,
    generic_ptr: *mut *mut c_char,
) -> jvmti::jvmtiError {
    unsafe {
        *signature_ptr = CLASS_SIGNATURE.as_ptr() as *mut c_char;
        *generic_ptr = CLASS_GENERIC.as_ptr() as *mut c_char;
    }
    jvmti::jvmtiError::NONE
}

#[test]
fn class_signatures_decode_both_fields() {
    let mut interface = empty_interface();
    interface.GetClassSignature = Some(write_class_signature);
    interface.Deallocate = Some(deallocate_noop);
    let mut env_struct = jvmti::jvmtiEnv { functions: &interface };
    let mut env = unsafe { JvmtiEnv::from_raw(&mut env_struct) };

    let class = JClass::from_raw(0x20 as jni::jclass);
    assert_eq!(
        env.get_class_signature(&class).unwrap(),
        ClassSignature {
            signature: "Ljava/util/List;".to_string(),
            generic_signature: Some("<E:Ljava/lang/Object;>Ljava/lang/Object;".to_string()),
        }
    );
}

static SOURCE_FILE: &[u8] = b"Main.java\0";

unsafe extern "system" fn write_source_file(
    _env: *mut jvmti::jvmtiEnv,
    _klass: jni::jclass,
    source_name_ptr: *mut *mut c_char,
) -> jvmti::jvmtiError {
    unsafe {
        *source_name_ptr = SOURCE_FILE.as_ptr() as *mut c_char;
    }
    jvmti::jvmtiError::NONE
}

unsafe extern "system" fn absent_source_file(
    _env: *mut jvmti::jvmtiEnv,
    _klass: jni::jclass,
    _source_name_ptr: *mut *mut c_char,
) -> jvmti::jvmtiError {
    jvmti::jvmtiError::ABSENT_INFORMATION
}

#[test]
fn source_file_names_are_optional() {
    let class = JClass::from_raw(0x20 as jni::jclass);

    let mut interface = empty_interface();
    interface.GetSourceFileName = Some(write_source_file);
    interface.Deallocate = Some(deallocate_noop);
    let mut env_struct = jvmti::jvmtiEnv { functions: &interface };
    let mut env = unsafe { JvmtiEnv::from_raw(&mut env_struct) };
    assert_eq!(env.get_source_file_name(&class).unwrap(), Some("Main.java".to_string()));

    let mut interface = empty_interface();
    interface.GetSourceFileName = Some(absent_source_file);
    interface.Deallocate = Some(deallocate_noop);
    let mut env_struct = jvmti::jvmtiEnv { functions: &interface };
    let mut env = unsafe { JvmtiEnv::from_raw(&mut env_struct) };
    assert_eq!(env.get_source_file_name(&class).unwrap(), None);
}

static LINE_TABLE: [jvmti::jvmtiLineNumberEntry; 2] = [
    jvmti::jvmtiLineNumberEntry { start_location: 0, line_number: 14 },
    jvmti::jvmtiLineNumberEntry { start_location: 5, line_number: 16 },
];
static LINE_TABLE_FREED: Mutex<Vec<usize>> = Mutex::new(Vec::new());

unsafe extern "system" fn write_line_table(
    _env: *mut jvmti::jvmtiEnv,
    _method: jni::jmethodID,
    entry_count_ptr: *mut jni::jint,
    table_ptr: *mut *mut jvmti::jvmtiLineNumberEntry,
) -> jvmti::jvmtiError {
    unsafe {
        *entry_count_ptr = LINE_TABLE.len() as jni::jint;
        *table_ptr = LINE_TABLE.as_ptr() as *mut jvmti::jvmtiLineNumberEntry;
    }
    jvmti::jvmtiError::NONE
}

unsafe extern "system" fn record_line_table_free(
    _env: *mut jvmti::jvmtiEnv,
    mem: *mut c_uchar,
) -> jvmti::jvmtiError {
    LINE_TABLE_FREED.lock().unwrap().push(mem as usize);
    jvmti::jvmtiError::NONE
}

unsafe extern "system" fn absent_line_table(
    _env: *mut jvmti::jvmtiEnv,
    _method: jni::jmethodID,
    _entry_count_ptr: *mut jni::jint,
    _table_ptr: *mut *mut jvmti::jvmtiLineNumberEntry,
) -> jvmti::jvmtiError {
    jvmti::jvmtiError::ABSENT_INFORMATION
}

unsafe extern "system" fn refuse_line_table(
    _env: *mut jvmti::jvmtiEnv,
    _method: jni::jmethodID,
    _entry_count_ptr: *mut jni::jint,
    _table_ptr: *mut *mut jvmti::jvmtiLineNumberEntry,
) -> jvmti::jvmtiError {
    jvmti::jvmtiError::NATIVE_METHOD
}

#[test]
fn line_number_tables_are_copied_out_and_freed() {
    let method = JMethodId::from_raw(0x10 as jni::jmethodID);

    let mut interface = empty_interface();
    interface.GetLineNumberTable = Some(write_line_table);
    interface.Deallocate = Some(record_line_table_free);
    let mut env_struct = jvmti::jvmtiEnv { functions: &interface };
    let mut env = unsafe { JvmtiEnv::from_raw(&mut env_struct) };
    assert_eq!(
        env.get_line_number_table(&method).unwrap(),
        Some(vec![
            LineNumberEntry { start_location: 0, line_number: 14 },
            LineNumberEntry { start_location: 5, line_number: 16 },
        ])
    );
    assert_eq!(*LINE_TABLE_FREED.lock().unwrap(), vec![LINE_TABLE.as_ptr() as usize]);

    let mut interface = empty_interface();
    interface.GetLineNumberTable = Some(absent_line_table);
    interface.Deallocate = Some(deallocate_noop);
    let mut env_struct = jvmti::jvmtiEnv { functions: &interface };
    let mut env = unsafe { JvmtiEnv::from_raw(&mut env_struct) };
    assert_eq!(env.get_line_number_table(&method).unwrap(), None);

    let mut interface = empty_interface();
    interface.GetLineNumberTable = Some(refuse_line_table);
    interface.Deallocate = Some(deallocate_noop);
    let mut env_struct = jvmti::jvmtiEnv { functions: &interface };
    let mut env = unsafe { JvmtiEnv::from_raw(&mut env_struct) };
    assert!(matches!(
        env.get_line_number_table(&method),
        Err(JvmtiError::NativeMethod)
    ));
}

static CALLBACK_TABLE_SIZE: AtomicI32 = AtomicI32::new(0);
static CALLBACK_TABLE_PTR: AtomicUsize = AtomicUsize::new(0);

unsafe extern "system" fn record_callback_table(
    _env: *mut jvmti::jvmtiEnv,
    callbacks: *const jvmti::jvmtiEventCallbacks,
    size_of_callbacks: jni::jint,
) -> jvmti::jvmtiError {
    CALLBACK_TABLE_SIZE.store(size_of_callbacks, Ordering::SeqCst);
    CALLBACK_TABLE_PTR.store(callbacks as usize, Ordering::SeqCst);
    jvmti::jvmtiError::NONE
}

#[test]
fn callback_tables_pass_their_size() {
    let mut interface = empty_interface();
    interface.SetEventCallbacks = Some(record_callback_table);
    let mut env_struct = jvmti::jvmtiEnv { functions: &interface };
    let mut env = unsafe { JvmtiEnv::from_raw(&mut env_struct) };

    let callbacks = jvmti::jvmtiEventCallbacks::default();
    env.set_event_callbacks(&callbacks).unwrap();
    assert_eq!(
        CALLBACK_TABLE_SIZE.load(Ordering::SeqCst),
        size_of::<jvmti::jvmtiEventCallbacks>() as jni::jint
    );
    assert_ne!(CALLBACK_TABLE_PTR.load(Ordering::SeqCst), 0);
}

static DISPOSALS: AtomicUsize = AtomicUsize::new(0);
static HANDED_OUT_ENV: AtomicUsize = AtomicUsize::new(0);
static REQUESTED_VERSION: AtomicI32 = AtomicI32::new(0);

unsafe extern "system" fn count_dispose(_env: *mut jvmti::jvmtiEnv) -> jvmti::jvmtiError {
    DISPOSALS.fetch_add(1, Ordering::SeqCst);
    jvmti::jvmtiError::NONE
}

unsafe extern "system" fn hand_out_env(
    _vm: *mut jni::JavaVM,
    penv: *mut *mut c_void,
    version: jni::jint,
) -> jni::jint {
    REQUESTED_VERSION.store(version, Ordering::SeqCst);
    unsafe {
        *penv = HANDED_OUT_ENV.load(Ordering::SeqCst) as *mut c_void;
    }
    jni::JNI_OK
}

#[test]
fn owned_environments_are_disposed_of_once_dropped() {
    let mut interface = empty_interface();
    interface.DisposeEnvironment = Some(count_dispose);
    let mut env_struct = jvmti::jvmtiEnv { functions: &interface };
    HANDED_OUT_ENV.store(&mut env_struct as *mut jvmti::jvmtiEnv as usize, Ordering::SeqCst);

    let mut invoke: jni::JNIInvokeInterface_ = unsafe { std::mem::zeroed() };
    invoke.GetEnv = Some(hand_out_env);
    let mut vm: jni::JavaVM = &invoke;
    let jvm = unsafe { Jvm::from_raw(&mut vm) };

    let env = jvm.get_jvmti_env(JvmtiVersion::V11).unwrap();
    assert_eq!(REQUESTED_VERSION.load(Ordering::SeqCst), jvmti::JVMTI_VERSION_11);
    assert_eq!(DISPOSALS.load(Ordering::SeqCst), 0);
    drop(env);
    assert_eq!(DISPOSALS.load(Ordering::SeqCst), 1);

    // Environments wrapped around a callback argument stay with the VM.
    let borrowed = unsafe { JvmtiEnv::from_raw(&mut env_struct) };
    drop(borrowed);
    assert_eq!(DISPOSALS.load(Ordering::SeqCst), 1);
}

unsafe extern "system" fn refuse_env(
    _vm: *mut jni::JavaVM,
    _penv: *mut *mut c_void,
    _version: jni::jint,
) -> jni::jint {
    jni::JNI_EVERSION
}

#[test]
fn get_env_failures_surface_the_jni_code() {
    let mut invoke: jni::JNIInvokeInterface_ = unsafe { std::mem::zeroed() };
    invoke.GetEnv = Some(refuse_env);
    let mut vm: jni::JavaVM = &invoke;
    let jvm = unsafe { Jvm::from_raw(&mut vm) };

    assert!(matches!(
        jvm.get_jvmti_env(JvmtiVersion::Current),
        Err(JniError::JniVersionError)
    ));
}

unsafe extern "system" fn fill_potential_caps(
    _env: *mut jvmti::jvmtiEnv,
    capabilities_ptr: *mut jvmti::jvmtiCapabilities,
) -> jvmti::jvmtiError {
    let mut caps = jvmti::jvmtiCapabilities::default();
    caps.set_can_generate_compiled_method_load_events(true);
    caps.set_can_get_line_numbers(true);
    unsafe {
        *capabilities_ptr = caps;
    }
    jvmti::jvmtiError::NONE
}

#[test]
fn capabilities_come_back_from_the_vm() {
    let mut interface = empty_interface();
    interface.GetPotentialCapabilities = Some(fill_potential_caps);
    let mut env_struct = jvmti::jvmtiEnv { functions: &interface };
    let mut env = unsafe { JvmtiEnv::from_raw(&mut env_struct) };

    let caps = env.get_potential_capabilities().unwrap();
    assert!(caps.can_generate_compiled_method_load_events());
    assert!(caps.can_get_line_numbers());
    assert!(!caps.can_tag_objects());
}

unsafe extern "system" fn native_when_method_is_one(
    _env: *mut jvmti::jvmtiEnv,
    method: jni::jmethodID,
    is_native_ptr: *mut jni::jboolean,
) -> jvmti::jvmtiError {
    unsafe {
        *is_native_ptr = if method as usize == 1 { 1 } else { 0 };
    }
    jvmti::jvmtiError::NONE
}

#[test]
fn native_method_checks_decode_the_jboolean() {
    let mut interface = empty_interface();
    interface.IsMethodNative = Some(native_when_method_is_one);
    let mut env_struct = jvmti::jvmtiEnv { functions: &interface };
    let mut env = unsafe { JvmtiEnv::from_raw(&mut env_struct) };

    assert!(env.is_method_native(&JMethodId::from_raw(1 as jni::jmethodID)).unwrap());
    assert!(!env.is_method_native(&JMethodId::from_raw(2 as jni::jmethodID)).unwrap());
}
