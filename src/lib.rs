//! Agent plumbing for the JVM tool interface.
//!
//! The crate covers the glue a native JVMTI agent needs: the raw
//! function table and its companion structs ([`sys`]), safe wrappers for
//! the calls agents make while wiring themselves up ([`env`]), decoding
//! of the records the JIT attaches to compiled method load events
//! ([`records`]), and the event trampolines that route VM callbacks to
//! an [`Agent`] installed with [`export_agent!`].
//!
//! A minimal agent:
//!
//! ```rust,ignore
//! use jvmti_agent::prelude::*;
//!
//! #[derive(Default)]
//! struct Tracer;
//!
//! impl Agent for Tracer {
//!     fn on_load(&self, vm: &Jvm, _options: Option<&str>) -> jni::jint {
//!         let mut env = match vm.get_jvmti_env(JvmtiVersion::Current) {
//!             Ok(env) => env,
//!             Err(_) => return jni::JNI_ERR,
//!         };
//!         let mut settings = EventSettings::new();
//!         settings.enable_compiled_method_load(true);
//!         if env.set_event_callbacks(&settings.callbacks()).is_err() {
//!             return jni::JNI_ERR;
//!         }
//!         for event in settings.enabled_events() {
//!             if env
//!                 .set_event_notification_mode(JvmtiEventMode::Enable, event, None)
//!                 .is_err()
//!             {
//!                 return jni::JNI_ERR;
//!             }
//!         }
//!         jni::JNI_OK
//!     }
//! }
//!
//! export_agent!(Tracer);
//! ```
//!
//! Built as a `cdylib`, the library is loaded with
//! `java -agentpath:/path/to/libtracer.so ...`.

pub mod env;
pub mod error;
pub mod prelude;
pub mod records;
pub mod strings;
pub mod sys;

use std::fmt;
use std::os::raw::{c_char, c_uchar, c_void};
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;

use log::{debug, error, warn};

use crate::env::{JClass, JLocation, JMethodId, JThread, Jvm, JvmtiEnv, JvmtiEvent};
use crate::records::{AddressLocationEntry, CompiledMethodLoadRecord};
use crate::sys::{jni, jvmti};

/// The behavior of an agent.
///
/// [`on_load`](Agent::on_load) is the only required method. It runs
/// during `Agent_OnLoad`, before the VM is initialized, and is where
/// capabilities, callbacks and notification modes are set up. Event
/// methods default to doing nothing; override the ones the agent
/// subscribed to through [`EventSettings`].
///
/// Implementations are shared across whatever threads the VM delivers
/// events on, hence the `Sync + Send` bound. A panic escaping any method
/// is caught and logged instead of unwinding into the VM.
pub trait Agent: Sync + Send {
    /// Called from `Agent_OnLoad`. Return [`jni::JNI_OK`] to let the VM
    /// continue starting up, [`jni::JNI_ERR`] to abort.
    fn on_load(&self, vm: &Jvm, options: Option<&str>) -> jni::jint;

    /// Called from `Agent_OnUnload` as the library is about to be
    /// unloaded.
    fn on_unload(&self, _vm: &Jvm) {}

    fn vm_init(&self, _env: &mut JvmtiEnv, _jni_env: *mut jni::JNIEnv, _thread: JThread) {}

    fn vm_death(&self, _env: &mut JvmtiEnv, _jni_env: *mut jni::JNIEnv) {}

    fn thread_start(&self, _env: &mut JvmtiEnv, _jni_env: *mut jni::JNIEnv, _thread: JThread) {}

    fn thread_end(&self, _env: &mut JvmtiEnv, _jni_env: *mut jni::JNIEnv, _thread: JThread) {}

    /// `class_being_redefined` is `None` when the hook fires for a fresh
    /// class load rather than a redefinition or retransformation. The
    /// out parameters are passed through untouched so instrumenting
    /// agents can hand back replacement class data.
    #[allow(clippy::too_many_arguments)]
    fn class_file_load_hook(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        _class_being_redefined: Option<JClass>,
        _loader: jni::jobject,
        _name: *const c_char,
        _protection_domain: jni::jobject,
        _class_data_len: jni::jint,
        _class_data: *const c_uchar,
        _new_class_data_len: *mut jni::jint,
        _new_class_data: *mut *mut c_uchar,
    ) {
    }

    fn class_load(&self, _env: &mut JvmtiEnv, _jni_env: *mut jni::JNIEnv, _thread: JThread, _class: JClass) {}

    fn class_prepare(&self, _env: &mut JvmtiEnv, _jni_env: *mut jni::JNIEnv, _thread: JThread, _class: JClass) {}

    fn vm_start(&self, _env: &mut JvmtiEnv, _jni_env: *mut jni::JNIEnv) {}

    /// `catch_method` is `None` when the exception is not caught in Java
    /// code; `catch_location` is only meaningful when it is `Some`.
    #[allow(clippy::too_many_arguments)]
    fn exception(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        _thread: JThread,
        _method: JMethodId,
        _location: JLocation,
        _exception: jni::jobject,
        _catch_method: Option<JMethodId>,
        _catch_location: JLocation,
    ) {
    }

    fn exception_catch(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        _thread: JThread,
        _method: JMethodId,
        _location: JLocation,
        _exception: jni::jobject,
    ) {
    }

    fn single_step(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        _thread: JThread,
        _method: JMethodId,
        _location: JLocation,
    ) {
    }

    fn frame_pop(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        _thread: JThread,
        _method: JMethodId,
        _was_popped_by_exception: bool,
    ) {
    }

    fn breakpoint(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        _thread: JThread,
        _method: JMethodId,
        _location: JLocation,
    ) {
    }

    #[allow(clippy::too_many_arguments)]
    fn field_access(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        _thread: JThread,
        _method: JMethodId,
        _location: JLocation,
        _field_class: JClass,
        _object: jni::jobject,
        _field: jni::jfieldID,
    ) {
    }

    #[allow(clippy::too_many_arguments)]
    fn field_modification(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        _thread: JThread,
        _method: JMethodId,
        _location: JLocation,
        _field_class: JClass,
        _object: jni::jobject,
        _field: jni::jfieldID,
        _signature_type: c_char,
        _new_value: jni::jvalue,
    ) {
    }

    fn method_entry(&self, _env: &mut JvmtiEnv, _jni_env: *mut jni::JNIEnv, _thread: JThread, _method: JMethodId) {}

    fn method_exit(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        _thread: JThread,
        _method: JMethodId,
        _was_popped_by_exception: bool,
        _return_value: jni::jvalue,
    ) {
    }

    /// `new_address_ptr` can be written through to rebind the native
    /// method to a different implementation.
    fn native_method_bind(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        _thread: JThread,
        _method: JMethodId,
        _address: *mut c_void,
        _new_address_ptr: *mut *mut c_void,
    ) {
    }

    /// The address location map and the compile information records are
    /// decoded copies; the VM frees the underlying memory when the
    /// callback returns.
    fn compiled_method_load(
        &self,
        _env: &mut JvmtiEnv,
        _method: JMethodId,
        _code_addr: usize,
        _code_size: usize,
        _address_locations: Option<&[AddressLocationEntry]>,
        _compile_infos: Option<&[CompiledMethodLoadRecord]>,
    ) {
    }

    fn compiled_method_unload(&self, _env: &mut JvmtiEnv, _method: JMethodId, _code_addr: usize) {}

    fn dynamic_code_generated(&self, _env: &mut JvmtiEnv, _name: &str, _address: usize, _length: usize) {}

    fn data_dump_request(&self, _env: &mut JvmtiEnv) {}

    fn monitor_wait(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        _thread: JThread,
        _object: jni::jobject,
        _timeout: i64,
    ) {
    }

    fn monitor_waited(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        _thread: JThread,
        _object: jni::jobject,
        _timed_out: bool,
    ) {
    }

    fn monitor_contended_enter(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        _thread: JThread,
        _object: jni::jobject,
    ) {
    }

    fn monitor_contended_entered(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        _thread: JThread,
        _object: jni::jobject,
    ) {
    }

    /// `flags` is a combination of the `JVMTI_RESOURCE_EXHAUSTED_*` bits
    /// describing what ran out.
    fn resource_exhausted(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        _flags: jni::jint,
        _description: Option<&str>,
    ) {
    }

    fn garbage_collection_start(&self, _env: &mut JvmtiEnv) {}

    fn garbage_collection_finish(&self, _env: &mut JvmtiEnv) {}

    fn object_free(&self, _env: &mut JvmtiEnv, _tag: i64) {}

    fn vm_object_alloc(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        _thread: JThread,
        _object: jni::jobject,
        _object_class: JClass,
        _size: i64,
    ) {
    }

    fn sampled_object_alloc(
        &self,
        _env: &mut JvmtiEnv,
        _jni_env: *mut jni::JNIEnv,
        _thread: JThread,
        _object: jni::jobject,
        _object_class: JClass,
        _size: i64,
    ) {
    }
}

/// The agent installed for this process. The event trampolines dispatch
/// to it.
pub static GLOBAL_AGENT: OnceLock<Box<dyn Agent>> = OnceLock::new();

/// Installs the process-wide agent. Fails when one is already installed.
pub fn set_global_agent(agent: Box<dyn Agent>) -> Result<(), ()> {
    GLOBAL_AGENT.set(agent).map_err(|_| ())
}

// Panics must not unwind across the callback boundary into the VM.
fn with_agent<F: FnOnce(&dyn Agent)>(event: &str, f: F) {
    if let Some(agent) = GLOBAL_AGENT.get() {
        if let Err(e) = panic::catch_unwind(AssertUnwindSafe(|| f(agent.as_ref()))) {
            error!("Failed to handle the '{}' event: {:?}", event, e);
        }
    }
}

unsafe extern "system" fn trampoline_vm_init(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    thread: jni::jthread,
) {
    with_agent("VMInit", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.vm_init(&mut env, jni_env, JThread::from_raw(thread));
    });
}

unsafe extern "system" fn trampoline_vm_death(jvmti_env: *mut jvmti::jvmtiEnv, jni_env: *mut jni::JNIEnv) {
    with_agent("VMDeath", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.vm_death(&mut env, jni_env);
    });
}

unsafe extern "system" fn trampoline_thread_start(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    thread: jni::jthread,
) {
    with_agent("ThreadStart", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.thread_start(&mut env, jni_env, JThread::from_raw(thread));
    });
}

unsafe extern "system" fn trampoline_thread_end(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    thread: jni::jthread,
) {
    with_agent("ThreadEnd", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.thread_end(&mut env, jni_env, JThread::from_raw(thread));
    });
}

#[allow(clippy::too_many_arguments)]
unsafe extern "system" fn trampoline_class_file_load_hook(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    class_being_redefined: jni::jclass,
    loader: jni::jobject,
    name: *const c_char,
    protection_domain: jni::jobject,
    class_data_len: jni::jint,
    class_data: *const c_uchar,
    new_class_data_len: *mut jni::jint,
    new_class_data: *mut *mut c_uchar,
) {
    with_agent("ClassFileLoadHook", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        let class_being_redefined = if class_being_redefined.is_null() {
            None
        } else {
            Some(JClass::from_raw(class_being_redefined))
        };
        agent.class_file_load_hook(
            &mut env,
            jni_env,
            class_being_redefined,
            loader,
            name,
            protection_domain,
            class_data_len,
            class_data,
            new_class_data_len,
            new_class_data,
        );
    });
}

unsafe extern "system" fn trampoline_class_load(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    thread: jni::jthread,
    klass: jni::jclass,
) {
    with_agent("ClassLoad", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.class_load(&mut env, jni_env, JThread::from_raw(thread), JClass::from_raw(klass));
    });
}

unsafe extern "system" fn trampoline_class_prepare(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    thread: jni::jthread,
    klass: jni::jclass,
) {
    with_agent("ClassPrepare", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.class_prepare(&mut env, jni_env, JThread::from_raw(thread), JClass::from_raw(klass));
    });
}

unsafe extern "system" fn trampoline_vm_start(jvmti_env: *mut jvmti::jvmtiEnv, jni_env: *mut jni::JNIEnv) {
    with_agent("VMStart", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.vm_start(&mut env, jni_env);
    });
}

#[allow(clippy::too_many_arguments)]
unsafe extern "system" fn trampoline_exception(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    thread: jni::jthread,
    method: jni::jmethodID,
    location: jvmti::jlocation,
    exception: jni::jobject,
    catch_method: jni::jmethodID,
    catch_location: jvmti::jlocation,
) {
    with_agent("Exception", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        let catch_method = if catch_method.is_null() {
            None
        } else {
            Some(JMethodId::from_raw(catch_method))
        };
        agent.exception(
            &mut env,
            jni_env,
            JThread::from_raw(thread),
            JMethodId::from_raw(method),
            location,
            exception,
            catch_method,
            catch_location,
        );
    });
}

unsafe extern "system" fn trampoline_exception_catch(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    thread: jni::jthread,
    method: jni::jmethodID,
    location: jvmti::jlocation,
    exception: jni::jobject,
) {
    with_agent("ExceptionCatch", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.exception_catch(
            &mut env,
            jni_env,
            JThread::from_raw(thread),
            JMethodId::from_raw(method),
            location,
            exception,
        );
    });
}

unsafe extern "system" fn trampoline_single_step(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    thread: jni::jthread,
    method: jni::jmethodID,
    location: jvmti::jlocation,
) {
    with_agent("SingleStep", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.single_step(
            &mut env,
            jni_env,
            JThread::from_raw(thread),
            JMethodId::from_raw(method),
            location,
        );
    });
}

unsafe extern "system" fn trampoline_frame_pop(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    thread: jni::jthread,
    method: jni::jmethodID,
    was_popped_by_exception: jni::jboolean,
) {
    with_agent("FramePop", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.frame_pop(
            &mut env,
            jni_env,
            JThread::from_raw(thread),
            JMethodId::from_raw(method),
            was_popped_by_exception != 0,
        );
    });
}

unsafe extern "system" fn trampoline_breakpoint(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    thread: jni::jthread,
    method: jni::jmethodID,
    location: jvmti::jlocation,
) {
    with_agent("Breakpoint", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.breakpoint(
            &mut env,
            jni_env,
            JThread::from_raw(thread),
            JMethodId::from_raw(method),
            location,
        );
    });
}

#[allow(clippy::too_many_arguments)]
unsafe extern "system" fn trampoline_field_access(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    thread: jni::jthread,
    method: jni::jmethodID,
    location: jvmti::jlocation,
    field_klass: jni::jclass,
    object: jni::jobject,
    field: jni::jfieldID,
) {
    with_agent("FieldAccess", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.field_access(
            &mut env,
            jni_env,
            JThread::from_raw(thread),
            JMethodId::from_raw(method),
            location,
            JClass::from_raw(field_klass),
            object,
            field,
        );
    });
}

#[allow(clippy::too_many_arguments)]
unsafe extern "system" fn trampoline_field_modification(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    thread: jni::jthread,
    method: jni::jmethodID,
    location: jvmti::jlocation,
    field_klass: jni::jclass,
    object: jni::jobject,
    field: jni::jfieldID,
    signature_type: c_char,
    new_value: jni::jvalue,
) {
    with_agent("FieldModification", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.field_modification(
            &mut env,
            jni_env,
            JThread::from_raw(thread),
            JMethodId::from_raw(method),
            location,
            JClass::from_raw(field_klass),
            object,
            field,
            signature_type,
            new_value,
        );
    });
}

unsafe extern "system" fn trampoline_method_entry(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    thread: jni::jthread,
    method: jni::jmethodID,
) {
    with_agent("MethodEntry", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.method_entry(&mut env, jni_env, JThread::from_raw(thread), JMethodId::from_raw(method));
    });
}

unsafe extern "system" fn trampoline_method_exit(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    thread: jni::jthread,
    method: jni::jmethodID,
    was_popped_by_exception: jni::jboolean,
    return_value: jni::jvalue,
) {
    with_agent("MethodExit", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.method_exit(
            &mut env,
            jni_env,
            JThread::from_raw(thread),
            JMethodId::from_raw(method),
            was_popped_by_exception != 0,
            return_value,
        );
    });
}

unsafe extern "system" fn trampoline_native_method_bind(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    thread: jni::jthread,
    method: jni::jmethodID,
    address: *mut c_void,
    new_address_ptr: *mut *mut c_void,
) {
    with_agent("NativeMethodBind", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.native_method_bind(
            &mut env,
            jni_env,
            JThread::from_raw(thread),
            JMethodId::from_raw(method),
            address,
            new_address_ptr,
        );
    });
}

unsafe extern "system" fn trampoline_compiled_method_load(
    jvmti_env: *mut jvmti::jvmtiEnv,
    method: jni::jmethodID,
    code_size: jni::jint,
    code_addr: *const c_void,
    map_length: jni::jint,
    map: *const jvmti::jvmtiAddrLocationMap,
    compile_info: *const c_void,
) {
    with_agent("CompiledMethodLoad", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        let address_locations = unsafe { records::to_address_locations(map_length, map) };
        let compile_infos = unsafe { records::to_compile_infos(compile_info) };
        agent.compiled_method_load(
            &mut env,
            JMethodId::from_raw(method),
            code_addr as usize,
            code_size as usize,
            address_locations.as_deref(),
            compile_infos.as_deref(),
        );
    });
}

unsafe extern "system" fn trampoline_compiled_method_unload(
    jvmti_env: *mut jvmti::jvmtiEnv,
    method: jni::jmethodID,
    code_addr: *const c_void,
) {
    with_agent("CompiledMethodUnload", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.compiled_method_unload(&mut env, JMethodId::from_raw(method), code_addr as usize);
    });
}

unsafe extern "system" fn trampoline_dynamic_code_generated(
    jvmti_env: *mut jvmti::jvmtiEnv,
    name: *const c_char,
    address: *const c_void,
    length: jni::jint,
) {
    with_agent("DynamicCodeGenerated", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        match unsafe { strings::from_modified_utf8(name) } {
            Ok(Some(name)) => {
                agent.dynamic_code_generated(&mut env, &name, address as usize, length as usize)
            }
            Ok(None) => {}
            Err(e) => warn!("Failed to decode the name of a dynamic code generated event: {}", e),
        }
    });
}

unsafe extern "system" fn trampoline_data_dump_request(jvmti_env: *mut jvmti::jvmtiEnv) {
    with_agent("DataDumpRequest", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.data_dump_request(&mut env);
    });
}

unsafe extern "system" fn trampoline_monitor_wait(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    thread: jni::jthread,
    object: jni::jobject,
    timeout: jni::jlong,
) {
    with_agent("MonitorWait", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.monitor_wait(&mut env, jni_env, JThread::from_raw(thread), object, timeout);
    });
}

unsafe extern "system" fn trampoline_monitor_waited(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    thread: jni::jthread,
    object: jni::jobject,
    timed_out: jni::jboolean,
) {
    with_agent("MonitorWaited", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.monitor_waited(&mut env, jni_env, JThread::from_raw(thread), object, timed_out != 0);
    });
}

unsafe extern "system" fn trampoline_monitor_contended_enter(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    thread: jni::jthread,
    object: jni::jobject,
) {
    with_agent("MonitorContendedEnter", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.monitor_contended_enter(&mut env, jni_env, JThread::from_raw(thread), object);
    });
}

unsafe extern "system" fn trampoline_monitor_contended_entered(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    thread: jni::jthread,
    object: jni::jobject,
) {
    with_agent("MonitorContendedEntered", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.monitor_contended_entered(&mut env, jni_env, JThread::from_raw(thread), object);
    });
}

unsafe extern "system" fn trampoline_resource_exhausted(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    flags: jni::jint,
    _reserved: *const c_void,
    description: *const c_char,
) {
    with_agent("ResourceExhausted", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        let description = match unsafe { strings::from_modified_utf8(description) } {
            Ok(description) => description,
            Err(e) => {
                warn!("Failed to decode the description of a resource exhausted event: {}", e);
                None
            }
        };
        agent.resource_exhausted(&mut env, jni_env, flags, description.as_deref());
    });
}

unsafe extern "system" fn trampoline_garbage_collection_start(jvmti_env: *mut jvmti::jvmtiEnv) {
    with_agent("GarbageCollectionStart", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.garbage_collection_start(&mut env);
    });
}

unsafe extern "system" fn trampoline_garbage_collection_finish(jvmti_env: *mut jvmti::jvmtiEnv) {
    with_agent("GarbageCollectionFinish", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.garbage_collection_finish(&mut env);
    });
}

unsafe extern "system" fn trampoline_object_free(jvmti_env: *mut jvmti::jvmtiEnv, tag: jni::jlong) {
    with_agent("ObjectFree", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.object_free(&mut env, tag);
    });
}

unsafe extern "system" fn trampoline_vm_object_alloc(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    thread: jni::jthread,
    object: jni::jobject,
    object_klass: jni::jclass,
    size: jni::jlong,
) {
    with_agent("VMObjectAlloc", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.vm_object_alloc(
            &mut env,
            jni_env,
            JThread::from_raw(thread),
            object,
            JClass::from_raw(object_klass),
            size,
        );
    });
}

unsafe extern "system" fn trampoline_sampled_object_alloc(
    jvmti_env: *mut jvmti::jvmtiEnv,
    jni_env: *mut jni::JNIEnv,
    thread: jni::jthread,
    object: jni::jobject,
    object_klass: jni::jclass,
    size: jni::jlong,
) {
    with_agent("SampledObjectAlloc", |agent| {
        let mut env = unsafe { JvmtiEnv::from_raw(jvmti_env) };
        agent.sampled_object_alloc(
            &mut env,
            jni_env,
            JThread::from_raw(thread),
            object,
            JClass::from_raw(object_klass),
            size,
        );
    });
}

/// The set of events an agent subscribes to.
///
/// Build the settings during [`Agent::on_load`], install the matching
/// callback table with [`JvmtiEnv::set_event_callbacks`], and enable
/// delivery with [`JvmtiEnv::set_event_notification_mode`] for each of
/// [`enabled_events`](EventSettings::enabled_events).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct EventSettings {
    flags: u64,
}

impl EventSettings {
    pub fn new() -> EventSettings {
        EventSettings::default()
    }

    fn set_flag(&mut self, event: jvmti::jvmtiEvent, value: bool) {
        let bit = event - jvmti::JVMTI_MIN_EVENT_TYPE_VAL;
        if value {
            self.flags |= 1 << bit;
        } else {
            self.flags &= !(1 << bit);
        }
    }

    fn get_flag(&self, event: jvmti::jvmtiEvent) -> bool {
        self.flags & (1 << (event - jvmti::JVMTI_MIN_EVENT_TYPE_VAL)) != 0
    }

    // [50]
    pub fn enable_vm_init(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_VM_INIT, enabled);
        self
    }
    pub fn vm_init_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_VM_INIT)
    }

    // [51]
    pub fn enable_vm_death(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_VM_DEATH, enabled);
        self
    }
    pub fn vm_death_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_VM_DEATH)
    }

    // [52]
    pub fn enable_thread_start(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_THREAD_START, enabled);
        self
    }
    pub fn thread_start_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_THREAD_START)
    }

    // [53]
    pub fn enable_thread_end(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_THREAD_END, enabled);
        self
    }
    pub fn thread_end_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_THREAD_END)
    }

    // [54]
    pub fn enable_class_file_load_hook(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_CLASS_FILE_LOAD_HOOK, enabled);
        self
    }
    pub fn class_file_load_hook_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_CLASS_FILE_LOAD_HOOK)
    }

    // [55]
    pub fn enable_class_load(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_CLASS_LOAD, enabled);
        self
    }
    pub fn class_load_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_CLASS_LOAD)
    }

    // [56]
    pub fn enable_class_prepare(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_CLASS_PREPARE, enabled);
        self
    }
    pub fn class_prepare_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_CLASS_PREPARE)
    }

    // [57]
    pub fn enable_vm_start(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_VM_START, enabled);
        self
    }
    pub fn vm_start_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_VM_START)
    }

    // [58]
    pub fn enable_exception(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_EXCEPTION, enabled);
        self
    }
    pub fn exception_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_EXCEPTION)
    }

    // [59]
    pub fn enable_exception_catch(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_EXCEPTION_CATCH, enabled);
        self
    }
    pub fn exception_catch_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_EXCEPTION_CATCH)
    }

    // [60]
    pub fn enable_single_step(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_SINGLE_STEP, enabled);
        self
    }
    pub fn single_step_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_SINGLE_STEP)
    }

    // [61]
    pub fn enable_frame_pop(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_FRAME_POP, enabled);
        self
    }
    pub fn frame_pop_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_FRAME_POP)
    }

    // [62]
    pub fn enable_breakpoint(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_BREAKPOINT, enabled);
        self
    }
    pub fn breakpoint_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_BREAKPOINT)
    }

    // [63]
    pub fn enable_field_access(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_FIELD_ACCESS, enabled);
        self
    }
    pub fn field_access_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_FIELD_ACCESS)
    }

    // [64]
    pub fn enable_field_modification(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_FIELD_MODIFICATION, enabled);
        self
    }
    pub fn field_modification_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_FIELD_MODIFICATION)
    }

    // [65]
    pub fn enable_method_entry(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_METHOD_ENTRY, enabled);
        self
    }
    pub fn method_entry_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_METHOD_ENTRY)
    }

    // [66]
    pub fn enable_method_exit(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_METHOD_EXIT, enabled);
        self
    }
    pub fn method_exit_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_METHOD_EXIT)
    }

    // [67]
    pub fn enable_native_method_bind(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_NATIVE_METHOD_BIND, enabled);
        self
    }
    pub fn native_method_bind_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_NATIVE_METHOD_BIND)
    }

    // [68]
    pub fn enable_compiled_method_load(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_COMPILED_METHOD_LOAD, enabled);
        self
    }
    pub fn compiled_method_load_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_COMPILED_METHOD_LOAD)
    }

    // [69]
    pub fn enable_compiled_method_unload(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_COMPILED_METHOD_UNLOAD, enabled);
        self
    }
    pub fn compiled_method_unload_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_COMPILED_METHOD_UNLOAD)
    }

    // [70]
    pub fn enable_dynamic_code_generated(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_DYNAMIC_CODE_GENERATED, enabled);
        self
    }
    pub fn dynamic_code_generated_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_DYNAMIC_CODE_GENERATED)
    }

    // [71]
    pub fn enable_data_dump_request(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_DATA_DUMP_REQUEST, enabled);
        self
    }
    pub fn data_dump_request_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_DATA_DUMP_REQUEST)
    }

    // [73]
    pub fn enable_monitor_wait(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_MONITOR_WAIT, enabled);
        self
    }
    pub fn monitor_wait_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_MONITOR_WAIT)
    }

    // [74]
    pub fn enable_monitor_waited(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_MONITOR_WAITED, enabled);
        self
    }
    pub fn monitor_waited_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_MONITOR_WAITED)
    }

    // [75]
    pub fn enable_monitor_contended_enter(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_MONITOR_CONTENDED_ENTER, enabled);
        self
    }
    pub fn monitor_contended_enter_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_MONITOR_CONTENDED_ENTER)
    }

    // [76]
    pub fn enable_monitor_contended_entered(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_MONITOR_CONTENDED_ENTERED, enabled);
        self
    }
    pub fn monitor_contended_entered_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_MONITOR_CONTENDED_ENTERED)
    }

    // [80]
    pub fn enable_resource_exhausted(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_RESOURCE_EXHAUSTED, enabled);
        self
    }
    pub fn resource_exhausted_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_RESOURCE_EXHAUSTED)
    }

    // [81]
    pub fn enable_garbage_collection_start(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_GARBAGE_COLLECTION_START, enabled);
        self
    }
    pub fn garbage_collection_start_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_GARBAGE_COLLECTION_START)
    }

    // [82]
    pub fn enable_garbage_collection_finish(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_GARBAGE_COLLECTION_FINISH, enabled);
        self
    }
    pub fn garbage_collection_finish_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_GARBAGE_COLLECTION_FINISH)
    }

    // [83]
    pub fn enable_object_free(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_OBJECT_FREE, enabled);
        self
    }
    pub fn object_free_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_OBJECT_FREE)
    }

    // [84]
    pub fn enable_vm_object_alloc(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_VM_OBJECT_ALLOC, enabled);
        self
    }
    pub fn vm_object_alloc_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_VM_OBJECT_ALLOC)
    }

    // [86]
    pub fn enable_sampled_object_alloc(&mut self, enabled: bool) -> &mut EventSettings {
        self.set_flag(jvmti::JVMTI_EVENT_SAMPLED_OBJECT_ALLOC, enabled);
        self
    }
    pub fn sampled_object_alloc_enabled(&self) -> bool {
        self.get_flag(jvmti::JVMTI_EVENT_SAMPLED_OBJECT_ALLOC)
    }

    /// Builds the callback table routing the enabled events to the
    /// installed agent. Disabled events keep a null slot.
    pub fn callbacks(&self) -> jvmti::jvmtiEventCallbacks {
        let mut callbacks = jvmti::jvmtiEventCallbacks::default();
        if self.vm_init_enabled() {
            callbacks.VMInit = Some(trampoline_vm_init);
        }
        if self.vm_death_enabled() {
            callbacks.VMDeath = Some(trampoline_vm_death);
        }
        if self.thread_start_enabled() {
            callbacks.ThreadStart = Some(trampoline_thread_start);
        }
        if self.thread_end_enabled() {
            callbacks.ThreadEnd = Some(trampoline_thread_end);
        }
        if self.class_file_load_hook_enabled() {
            callbacks.ClassFileLoadHook = Some(trampoline_class_file_load_hook);
        }
        if self.class_load_enabled() {
            callbacks.ClassLoad = Some(trampoline_class_load);
        }
        if self.class_prepare_enabled() {
            callbacks.ClassPrepare = Some(trampoline_class_prepare);
        }
        if self.vm_start_enabled() {
            callbacks.VMStart = Some(trampoline_vm_start);
        }
        if self.exception_enabled() {
            callbacks.Exception = Some(trampoline_exception);
        }
        if self.exception_catch_enabled() {
            callbacks.ExceptionCatch = Some(trampoline_exception_catch);
        }
        if self.single_step_enabled() {
            callbacks.SingleStep = Some(trampoline_single_step);
        }
        if self.frame_pop_enabled() {
            callbacks.FramePop = Some(trampoline_frame_pop);
        }
        if self.breakpoint_enabled() {
            callbacks.Breakpoint = Some(trampoline_breakpoint);
        }
        if self.field_access_enabled() {
            callbacks.FieldAccess = Some(trampoline_field_access);
        }
        if self.field_modification_enabled() {
            callbacks.FieldModification = Some(trampoline_field_modification);
        }
        if self.method_entry_enabled() {
            callbacks.MethodEntry = Some(trampoline_method_entry);
        }
        if self.method_exit_enabled() {
            callbacks.MethodExit = Some(trampoline_method_exit);
        }
        if self.native_method_bind_enabled() {
            callbacks.NativeMethodBind = Some(trampoline_native_method_bind);
        }
        if self.compiled_method_load_enabled() {
            callbacks.CompiledMethodLoad = Some(trampoline_compiled_method_load);
        }
        if self.compiled_method_unload_enabled() {
            callbacks.CompiledMethodUnload = Some(trampoline_compiled_method_unload);
        }
        if self.dynamic_code_generated_enabled() {
            callbacks.DynamicCodeGenerated = Some(trampoline_dynamic_code_generated);
        }
        if self.data_dump_request_enabled() {
            callbacks.DataDumpRequest = Some(trampoline_data_dump_request);
        }
        if self.monitor_wait_enabled() {
            callbacks.MonitorWait = Some(trampoline_monitor_wait);
        }
        if self.monitor_waited_enabled() {
            callbacks.MonitorWaited = Some(trampoline_monitor_waited);
        }
        if self.monitor_contended_enter_enabled() {
            callbacks.MonitorContendedEnter = Some(trampoline_monitor_contended_enter);
        }
        if self.monitor_contended_entered_enabled() {
            callbacks.MonitorContendedEntered = Some(trampoline_monitor_contended_entered);
        }
        if self.resource_exhausted_enabled() {
            callbacks.ResourceExhausted = Some(trampoline_resource_exhausted);
        }
        if self.garbage_collection_start_enabled() {
            callbacks.GarbageCollectionStart = Some(trampoline_garbage_collection_start);
        }
        if self.garbage_collection_finish_enabled() {
            callbacks.GarbageCollectionFinish = Some(trampoline_garbage_collection_finish);
        }
        if self.object_free_enabled() {
            callbacks.ObjectFree = Some(trampoline_object_free);
        }
        if self.vm_object_alloc_enabled() {
            callbacks.VMObjectAlloc = Some(trampoline_vm_object_alloc);
        }
        if self.sampled_object_alloc_enabled() {
            callbacks.SampledObjectAlloc = Some(trampoline_sampled_object_alloc);
        }
        callbacks
    }

    /// The enabled events in event number order, for driving
    /// [`JvmtiEnv::set_event_notification_mode`].
    pub fn enabled_events(&self) -> Vec<JvmtiEvent> {
        const ALL: [JvmtiEvent; 32] = [
            JvmtiEvent::VmInit,
            JvmtiEvent::VmDeath,
            JvmtiEvent::ThreadStart,
            JvmtiEvent::ThreadEnd,
            JvmtiEvent::ClassFileLoadHook,
            JvmtiEvent::ClassLoad,
            JvmtiEvent::ClassPrepare,
            JvmtiEvent::VmStart,
            JvmtiEvent::Exception,
            JvmtiEvent::ExceptionCatch,
            JvmtiEvent::SingleStep,
            JvmtiEvent::FramePop,
            JvmtiEvent::Breakpoint,
            JvmtiEvent::FieldAccess,
            JvmtiEvent::FieldModification,
            JvmtiEvent::MethodEntry,
            JvmtiEvent::MethodExit,
            JvmtiEvent::NativeMethodBind,
            JvmtiEvent::CompiledMethodLoad,
            JvmtiEvent::CompiledMethodUnload,
            JvmtiEvent::DynamicCodeGenerated,
            JvmtiEvent::DataDumpRequest,
            JvmtiEvent::MonitorWait,
            JvmtiEvent::MonitorWaited,
            JvmtiEvent::MonitorContendedEnter,
            JvmtiEvent::MonitorContendedEntered,
            JvmtiEvent::ResourceExhausted,
            JvmtiEvent::GarbageCollectionStart,
            JvmtiEvent::GarbageCollectionFinish,
            JvmtiEvent::ObjectFree,
            JvmtiEvent::VmObjectAlloc,
            JvmtiEvent::SampledObjectAlloc,
        ];
        ALL.iter()
            .copied()
            .filter(|event| self.get_flag(jvmti::jvmtiEvent::from(*event)))
            .collect()
    }
}

impl fmt::Display for EventSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        let mut first = true;
        for event in self.enabled_events() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{:?}", event)?;
            first = false;
        }
        write!(f, "]")
    }
}

/// Shared body of the `Agent_OnLoad` entry point generated by
/// [`export_agent!`].
///
/// # Safety
///
/// `vm` must be the pointer the VM passed to `Agent_OnLoad` and
/// `options` must be the options string the VM passed, or null.
#[doc(hidden)]
pub unsafe fn agent_load(vm: *mut jni::JavaVM, options: *const c_char, agent: Box<dyn Agent>) -> jni::jint {
    // Logging is initialized before anything can fail, so load failures
    // are visible somewhere.
    let _ = env_logger::try_init();
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        debug!("Agent loading");
        let options = match unsafe { strings::from_platform(options) } {
            Ok(options) => options,
            Err(e) => {
                error!("Failed to decode the agent options string: {}", e);
                return jni::JNI_ERR;
            }
        };
        if set_global_agent(agent).is_err() {
            error!("An agent is already installed in this process");
            return jni::JNI_ERR;
        }
        let jvm = unsafe { Jvm::from_raw(vm) };
        match GLOBAL_AGENT.get() {
            Some(agent) => agent.on_load(&jvm, options.as_deref()),
            None => jni::JNI_ERR,
        }
    }));
    match result {
        Ok(code) => code,
        Err(e) => {
            error!("Failed to load the agent: {:?}", e);
            jni::JNI_ERR
        }
    }
}

/// Shared body of the `Agent_OnUnload` entry point generated by
/// [`export_agent!`].
///
/// # Safety
///
/// `vm` must be the pointer the VM passed to `Agent_OnUnload`.
#[doc(hidden)]
pub unsafe fn agent_unload(vm: *mut jni::JavaVM) {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        debug!("Agent unloading");
        if let Some(agent) = GLOBAL_AGENT.get() {
            let jvm = unsafe { Jvm::from_raw(vm) };
            agent.on_unload(&jvm);
        }
    }));
    if let Err(e) = result {
        error!("Failed to unload the agent: {:?}", e);
    }
}

/// Exports the `Agent_OnLoad` and `Agent_OnUnload` entry points for an
/// agent type constructed through `Default`.
///
/// ```rust,ignore
/// export_agent!(MyAgent);
/// ```
#[macro_export]
macro_rules! export_agent {
    ($agent_type:ty) => {
        #[no_mangle]
        pub unsafe extern "system" fn Agent_OnLoad(
            vm: *mut $crate::sys::jni::JavaVM,
            options: *mut ::std::os::raw::c_char,
            _reserved: *mut ::std::os::raw::c_void,
        ) -> $crate::sys::jni::jint {
            unsafe {
                $crate::agent_load(vm, options, ::std::boxed::Box::new(<$agent_type>::default()))
            }
        }

        #[no_mangle]
        pub unsafe extern "system" fn Agent_OnUnload(vm: *mut $crate::sys::jni::JavaVM) {
            unsafe { $crate::agent_unload(vm) }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn default_settings_produce_an_empty_table() {
        let settings = EventSettings::new();
        let callbacks = settings.callbacks();
        assert!(callbacks.VMInit.is_none());
        assert!(callbacks.CompiledMethodLoad.is_none());
        assert!(callbacks.SampledObjectAlloc.is_none());
        assert!(settings.enabled_events().is_empty());
    }

    #[test]
    fn enabling_an_event_fills_its_slot() {
        let mut settings = EventSettings::new();
        settings.enable_compiled_method_load(true);
        let callbacks = settings.callbacks();
        assert!(callbacks.CompiledMethodLoad.is_some());
        assert!(callbacks.CompiledMethodUnload.is_none());
        assert!(callbacks.VMInit.is_none());
    }

    #[test]
    fn events_can_be_disabled_again() {
        let mut settings = EventSettings::new();
        settings.enable_method_entry(true).enable_method_exit(true);
        settings.enable_method_entry(false);
        assert!(!settings.method_entry_enabled());
        assert!(settings.method_exit_enabled());
        assert_eq!(settings.enabled_events(), vec![JvmtiEvent::MethodExit]);
    }

    #[test]
    fn enabled_events_come_back_in_event_order() {
        let mut settings = EventSettings::new();
        settings
            .enable_sampled_object_alloc(true)
            .enable_vm_init(true)
            .enable_monitor_wait(true);
        assert_eq!(
            settings.enabled_events(),
            vec![JvmtiEvent::VmInit, JvmtiEvent::MonitorWait, JvmtiEvent::SampledObjectAlloc]
        );
    }

    #[test]
    fn display_lists_enabled_events() {
        let mut settings = EventSettings::new();
        assert_eq!(settings.to_string(), "[]");
        settings.enable_vm_init(true).enable_vm_death(true);
        assert_eq!(settings.to_string(), "[VmInit VmDeath]");
    }

    static DATA_DUMP_COUNT: AtomicUsize = AtomicUsize::new(0);

    #[derive(Default)]
    struct CountingAgent;

    impl Agent for CountingAgent {
        fn on_load(&self, _vm: &Jvm, _options: Option<&str>) -> jni::jint {
            jni::JNI_OK
        }

        fn data_dump_request(&self, _env: &mut JvmtiEnv) {
            DATA_DUMP_COUNT.fetch_add(1, Ordering::SeqCst);
        }
    }

    // The sole test touching the process-wide agent slot.
    #[test]
    fn events_reach_the_installed_agent() {
        set_global_agent(Box::new(CountingAgent)).ok();
        let before = DATA_DUMP_COUNT.load(Ordering::SeqCst);
        unsafe { trampoline_data_dump_request(ptr::null_mut()) };
        assert_eq!(DATA_DUMP_COUNT.load(Ordering::SeqCst), before + 1);
    }
}
