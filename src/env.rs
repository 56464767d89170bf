// jvmti-agent/src/env.rs
//
// Safe wrappers over the raw environments. `Jvm` wraps the invocation
// interface, `JvmtiEnv` wraps a JVMTI environment and owns it when the
// crate obtained it (disposing on drop). Returned VM allocations are
// guarded so they are handed back to Deallocate on every path.

use std::mem::size_of;
use std::os::raw::c_char;
use std::ptr;
use std::slice;

use log::{debug, warn};

use crate::error::{
    GetClassSignatureError, GetMethodNameError, GetSourceFileNameError, JniError, JvmtiError,
};
use crate::strings;
use crate::sys::{jni, jvmti};

/// The virtual machine an agent entry point is handed.
#[derive(Debug)]
pub struct Jvm {
    vm: *mut jni::JavaVM,
}

/// A JVMTI environment.
///
/// Environments obtained through [`Jvm::get_jvmti_env`] are owned and
/// disposed of on drop; environments wrapped around an event callback
/// argument are borrowed from the VM and left alone.
#[derive(Debug)]
pub struct JvmtiEnv {
    env: *mut jvmti::jvmtiEnv,
    owned: bool,
}

// Owned environments are stored across threads between agent callbacks.
unsafe impl Send for JvmtiEnv {}

/// Interface versions accepted by `GetEnv`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JvmtiVersion {
    V1_0,
    V1_1,
    V1_2,
    V9,
    V11,
    /// The version the crate is maintained against.
    Current,
}

impl From<JvmtiVersion> for jni::jint {
    fn from(version: JvmtiVersion) -> jni::jint {
        match version {
            JvmtiVersion::V1_0 => jvmti::JVMTI_VERSION_1_0,
            JvmtiVersion::V1_1 => jvmti::JVMTI_VERSION_1_1,
            JvmtiVersion::V1_2 => jvmti::JVMTI_VERSION_1_2,
            JvmtiVersion::V9 => jvmti::JVMTI_VERSION_9,
            JvmtiVersion::V11 => jvmti::JVMTI_VERSION_11,
            JvmtiVersion::Current => jvmti::JVMTI_VERSION,
        }
    }
}

pub type JLocation = jvmti::jlocation;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct JThread {
    thread: jni::jthread,
}

impl JThread {
    pub fn from_raw(thread: jni::jthread) -> JThread {
        JThread { thread }
    }

    pub fn as_raw(&self) -> jni::jthread {
        self.thread
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct JClass {
    class: jni::jclass,
}

impl JClass {
    pub fn from_raw(class: jni::jclass) -> JClass {
        JClass { class }
    }

    pub fn as_raw(&self) -> jni::jclass {
        self.class
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct JMethodId {
    method: jni::jmethodID,
}

// Method IDs are process-wide opaque tokens, valid from any attached
// thread; decoded records holding them may cross threads.
unsafe impl Send for JMethodId {}

impl JMethodId {
    pub fn from_raw(method: jni::jmethodID) -> JMethodId {
        JMethodId { method }
    }

    pub fn as_raw(&self) -> jni::jmethodID {
        self.method
    }
}

/// Name, signature and optional generic signature of a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodName {
    pub name: String,
    pub signature: String,
    pub generic_signature: Option<String>,
}

/// Signature and optional generic signature of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSignature {
    pub signature: String,
    pub generic_signature: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineNumberEntry {
    pub start_location: JLocation,
    pub line_number: i32,
}

/// The events an agent can subscribe to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JvmtiEvent {
    VmInit,
    VmDeath,
    ThreadStart,
    ThreadEnd,
    ClassFileLoadHook,
    ClassLoad,
    ClassPrepare,
    VmStart,
    Exception,
    ExceptionCatch,
    SingleStep,
    FramePop,
    Breakpoint,
    FieldAccess,
    FieldModification,
    MethodEntry,
    MethodExit,
    NativeMethodBind,
    CompiledMethodLoad,
    CompiledMethodUnload,
    DynamicCodeGenerated,
    DataDumpRequest,
    MonitorWait,
    MonitorWaited,
    MonitorContendedEnter,
    MonitorContendedEntered,
    ResourceExhausted,
    GarbageCollectionStart,
    GarbageCollectionFinish,
    ObjectFree,
    VmObjectAlloc,
    SampledObjectAlloc,
}

impl From<JvmtiEvent> for jvmti::jvmtiEvent {
    fn from(event: JvmtiEvent) -> jvmti::jvmtiEvent {
        match event {
            JvmtiEvent::VmInit => jvmti::JVMTI_EVENT_VM_INIT,
            JvmtiEvent::VmDeath => jvmti::JVMTI_EVENT_VM_DEATH,
            JvmtiEvent::ThreadStart => jvmti::JVMTI_EVENT_THREAD_START,
            JvmtiEvent::ThreadEnd => jvmti::JVMTI_EVENT_THREAD_END,
            JvmtiEvent::ClassFileLoadHook => jvmti::JVMTI_EVENT_CLASS_FILE_LOAD_HOOK,
            JvmtiEvent::ClassLoad => jvmti::JVMTI_EVENT_CLASS_LOAD,
            JvmtiEvent::ClassPrepare => jvmti::JVMTI_EVENT_CLASS_PREPARE,
            JvmtiEvent::VmStart => jvmti::JVMTI_EVENT_VM_START,
            JvmtiEvent::Exception => jvmti::JVMTI_EVENT_EXCEPTION,
            JvmtiEvent::ExceptionCatch => jvmti::JVMTI_EVENT_EXCEPTION_CATCH,
            JvmtiEvent::SingleStep => jvmti::JVMTI_EVENT_SINGLE_STEP,
            JvmtiEvent::FramePop => jvmti::JVMTI_EVENT_FRAME_POP,
            JvmtiEvent::Breakpoint => jvmti::JVMTI_EVENT_BREAKPOINT,
            JvmtiEvent::FieldAccess => jvmti::JVMTI_EVENT_FIELD_ACCESS,
            JvmtiEvent::FieldModification => jvmti::JVMTI_EVENT_FIELD_MODIFICATION,
            JvmtiEvent::MethodEntry => jvmti::JVMTI_EVENT_METHOD_ENTRY,
            JvmtiEvent::MethodExit => jvmti::JVMTI_EVENT_METHOD_EXIT,
            JvmtiEvent::NativeMethodBind => jvmti::JVMTI_EVENT_NATIVE_METHOD_BIND,
            JvmtiEvent::CompiledMethodLoad => jvmti::JVMTI_EVENT_COMPILED_METHOD_LOAD,
            JvmtiEvent::CompiledMethodUnload => jvmti::JVMTI_EVENT_COMPILED_METHOD_UNLOAD,
            JvmtiEvent::DynamicCodeGenerated => jvmti::JVMTI_EVENT_DYNAMIC_CODE_GENERATED,
            JvmtiEvent::DataDumpRequest => jvmti::JVMTI_EVENT_DATA_DUMP_REQUEST,
            JvmtiEvent::MonitorWait => jvmti::JVMTI_EVENT_MONITOR_WAIT,
            JvmtiEvent::MonitorWaited => jvmti::JVMTI_EVENT_MONITOR_WAITED,
            JvmtiEvent::MonitorContendedEnter => jvmti::JVMTI_EVENT_MONITOR_CONTENDED_ENTER,
            JvmtiEvent::MonitorContendedEntered => jvmti::JVMTI_EVENT_MONITOR_CONTENDED_ENTERED,
            JvmtiEvent::ResourceExhausted => jvmti::JVMTI_EVENT_RESOURCE_EXHAUSTED,
            JvmtiEvent::GarbageCollectionStart => jvmti::JVMTI_EVENT_GARBAGE_COLLECTION_START,
            JvmtiEvent::GarbageCollectionFinish => jvmti::JVMTI_EVENT_GARBAGE_COLLECTION_FINISH,
            JvmtiEvent::ObjectFree => jvmti::JVMTI_EVENT_OBJECT_FREE,
            JvmtiEvent::VmObjectAlloc => jvmti::JVMTI_EVENT_VM_OBJECT_ALLOC,
            JvmtiEvent::SampledObjectAlloc => jvmti::JVMTI_EVENT_SAMPLED_OBJECT_ALLOC,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JvmtiEventMode {
    Enable,
    Disable,
}

impl From<JvmtiEventMode> for jvmti::jvmtiEventMode {
    fn from(mode: JvmtiEventMode) -> jvmti::jvmtiEventMode {
        match mode {
            JvmtiEventMode::Enable => jvmti::JVMTI_ENABLE,
            JvmtiEventMode::Disable => jvmti::JVMTI_DISABLE,
        }
    }
}

impl Jvm {
    /// Wraps the `JavaVM` pointer passed to an agent entry point.
    ///
    /// # Safety
    ///
    /// `vm` must be a live virtual machine pointer.
    pub unsafe fn from_raw(vm: *mut jni::JavaVM) -> Jvm {
        Jvm { vm }
    }

    pub fn as_raw(&self) -> *mut jni::JavaVM {
        self.vm
    }

    /// Obtains a JVMTI environment of the requested version through the
    /// invocation interface. The returned environment is owned and will
    /// be disposed of when dropped.
    pub fn get_jvmti_env(&self, version: JvmtiVersion) -> Result<JvmtiEnv, JniError> {
        unsafe {
            let mut env: *mut std::os::raw::c_void = ptr::null_mut();
            let result = (*(*self.vm)).GetEnv.unwrap()(self.vm, &mut env, jni::jint::from(version));
            if result != jni::JNI_OK {
                return Err(JniError::from(result));
            }
            if env.is_null() {
                return Err(JniError::UnknownError);
            }
            Ok(JvmtiEnv { env: env as *mut jvmti::jvmtiEnv, owned: true })
        }
    }
}

impl JvmtiEnv {
    /// Wraps an environment pointer the VM still owns, as passed to event
    /// callbacks. No disposal happens on drop.
    ///
    /// # Safety
    ///
    /// `env` must be a live JVMTI environment pointer.
    pub unsafe fn from_raw(env: *mut jvmti::jvmtiEnv) -> JvmtiEnv {
        JvmtiEnv { env, owned: false }
    }

    pub fn as_raw(&self) -> *mut jvmti::jvmtiEnv {
        self.env
    }

    pub fn add_capabilities(&mut self, capabilities: &jvmti::jvmtiCapabilities) -> Result<(), JvmtiError> {
        unsafe {
            let err = (*(*self.env).functions).AddCapabilities.unwrap()(self.env, capabilities);
            if err != jvmti::jvmtiError::NONE {
                return Err(JvmtiError::from(err));
            }
            Ok(())
        }
    }

    pub fn relinquish_capabilities(&mut self, capabilities: &jvmti::jvmtiCapabilities) -> Result<(), JvmtiError> {
        unsafe {
            let err = (*(*self.env).functions).RelinquishCapabilities.unwrap()(self.env, capabilities);
            if err != jvmti::jvmtiError::NONE {
                return Err(JvmtiError::from(err));
            }
            Ok(())
        }
    }

    /// The capabilities this environment currently possesses.
    pub fn get_capabilities(&mut self) -> Result<jvmti::jvmtiCapabilities, JvmtiError> {
        unsafe {
            let mut capabilities = jvmti::jvmtiCapabilities::default();
            let err = (*(*self.env).functions).GetCapabilities.unwrap()(self.env, &mut capabilities);
            if err != jvmti::jvmtiError::NONE {
                return Err(JvmtiError::from(err));
            }
            Ok(capabilities)
        }
    }

    /// The capabilities this environment could still request in the
    /// current phase.
    pub fn get_potential_capabilities(&mut self) -> Result<jvmti::jvmtiCapabilities, JvmtiError> {
        unsafe {
            let mut capabilities = jvmti::jvmtiCapabilities::default();
            let err = (*(*self.env).functions).GetPotentialCapabilities.unwrap()(self.env, &mut capabilities);
            if err != jvmti::jvmtiError::NONE {
                return Err(JvmtiError::from(err));
            }
            Ok(capabilities)
        }
    }

    pub fn get_version_number(&mut self) -> Result<i32, JvmtiError> {
        unsafe {
            let mut version: jni::jint = 0;
            let err = (*(*self.env).functions).GetVersionNumber.unwrap()(self.env, &mut version);
            if err != jvmti::jvmtiError::NONE {
                return Err(JvmtiError::from(err));
            }
            Ok(version)
        }
    }

    /// Installs an event callback table. The table size is passed along so
    /// the VM can accept tables from older headers.
    pub fn set_event_callbacks(&mut self, callbacks: &jvmti::jvmtiEventCallbacks) -> Result<(), JvmtiError> {
        unsafe {
            let err = (*(*self.env).functions).SetEventCallbacks.unwrap()(
                self.env,
                callbacks,
                size_of::<jvmti::jvmtiEventCallbacks>() as jni::jint,
            );
            if err != jvmti::jvmtiError::NONE {
                return Err(JvmtiError::from(err));
            }
            Ok(())
        }
    }

    /// Enables or disables delivery of one event, globally or for a single
    /// thread.
    pub fn set_event_notification_mode(
        &mut self,
        mode: JvmtiEventMode,
        event: JvmtiEvent,
        event_thread: Option<&JThread>,
    ) -> Result<(), JvmtiError> {
        unsafe {
            let err = (*(*self.env).functions).SetEventNotificationMode.unwrap()(
                self.env,
                jvmti::jvmtiEventMode::from(mode),
                jvmti::jvmtiEvent::from(event),
                event_thread.map_or(ptr::null_mut(), |t| t.thread),
            );
            if err != jvmti::jvmtiError::NONE {
                return Err(JvmtiError::from(err));
            }
            Ok(())
        }
    }

    /// Sets the allocation sampling interval in bytes for the sampled
    /// object allocation event.
    pub fn set_heap_sampling_interval(&mut self, sampling_interval: i32) -> Result<(), JvmtiError> {
        unsafe {
            let err = (*(*self.env).functions).SetHeapSamplingInterval.unwrap()(
                self.env,
                sampling_interval as jni::jint,
            );
            if err != jvmti::jvmtiError::NONE {
                return Err(JvmtiError::from(err));
            }
            Ok(())
        }
    }

    pub fn get_method_name(&mut self, method: &JMethodId) -> Result<MethodName, GetMethodNameError> {
        unsafe {
            let mut name_ptr: *mut c_char = ptr::null_mut();
            let mut signature_ptr: *mut c_char = ptr::null_mut();
            let mut generic_ptr: *mut c_char = ptr::null_mut();
            let err = (*(*self.env).functions).GetMethodName.unwrap()(
                self.env,
                method.method,
                &mut name_ptr,
                &mut signature_ptr,
                &mut generic_ptr,
            );
            let name = VmString::new(self.env, name_ptr);
            let signature = VmString::new(self.env, signature_ptr);
            let generic_signature = VmString::new(self.env, generic_ptr);
            if err != jvmti::jvmtiError::NONE {
                return Err(GetMethodNameError::from(JvmtiError::from(err)));
            }
            Ok(MethodName {
                name: name
                    .decode()
                    .map_err(GetMethodNameError::NameDecodeError)?
                    .unwrap_or_default(),
                signature: signature
                    .decode()
                    .map_err(GetMethodNameError::SignatureDecodeError)?
                    .unwrap_or_default(),
                generic_signature: generic_signature
                    .decode()
                    .map_err(GetMethodNameError::GenericSignatureDecodeError)?,
            })
        }
    }

    pub fn get_method_declaring_class(&mut self, method: &JMethodId) -> Result<JClass, JvmtiError> {
        unsafe {
            let mut class: jni::jclass = ptr::null_mut();
            let err = (*(*self.env).functions).GetMethodDeclaringClass.unwrap()(
                self.env,
                method.method,
                &mut class,
            );
            if err != jvmti::jvmtiError::NONE {
                return Err(JvmtiError::from(err));
            }
            Ok(JClass { class })
        }
    }

    pub fn get_class_signature(&mut self, class: &JClass) -> Result<ClassSignature, GetClassSignatureError> {
        unsafe {
            let mut signature_ptr: *mut c_char = ptr::null_mut();
            let mut generic_ptr: *mut c_char = ptr::null_mut();
            let err = (*(*self.env).functions).GetClassSignature.unwrap()(
                self.env,
                class.class,
                &mut signature_ptr,
                &mut generic_ptr,
            );
            let signature = VmString::new(self.env, signature_ptr);
            let generic_signature = VmString::new(self.env, generic_ptr);
            if err != jvmti::jvmtiError::NONE {
                return Err(GetClassSignatureError::from(JvmtiError::from(err)));
            }
            Ok(ClassSignature {
                signature: signature
                    .decode()
                    .map_err(GetClassSignatureError::SignatureDecodeError)?
                    .unwrap_or_default(),
                generic_signature: generic_signature
                    .decode()
                    .map_err(GetClassSignatureError::GenericSignatureDecodeError)?,
            })
        }
    }

    /// The source file name of a class, or `None` when the class file
    /// carries no SourceFile attribute.
    pub fn get_source_file_name(&mut self, class: &JClass) -> Result<Option<String>, GetSourceFileNameError> {
        unsafe {
            let mut source_name_ptr: *mut c_char = ptr::null_mut();
            let err = (*(*self.env).functions).GetSourceFileName.unwrap()(
                self.env,
                class.class,
                &mut source_name_ptr,
            );
            let source_name = VmString::new(self.env, source_name_ptr);
            match err {
                jvmti::jvmtiError::NONE => source_name
                    .decode()
                    .map_err(GetSourceFileNameError::SourceFileNameDecodeError),
                jvmti::jvmtiError::ABSENT_INFORMATION => Ok(None),
                err => Err(GetSourceFileNameError::from(JvmtiError::from(err))),
            }
        }
    }

    /// The line number table of a method, or `None` when line numbers are
    /// absent from the class file.
    pub fn get_line_number_table(&mut self, method: &JMethodId) -> Result<Option<Vec<LineNumberEntry>>, JvmtiError> {
        unsafe {
            let mut entry_count: jni::jint = 0;
            let mut table_ptr: *mut jvmti::jvmtiLineNumberEntry = ptr::null_mut();
            let err = (*(*self.env).functions).GetLineNumberTable.unwrap()(
                self.env,
                method.method,
                &mut entry_count,
                &mut table_ptr,
            );
            let table = VmLineNumberTable::new(self.env, table_ptr, entry_count);
            match err {
                jvmti::jvmtiError::NONE => Ok(table.as_slice().map(|entries| {
                    entries
                        .iter()
                        .map(|e| LineNumberEntry {
                            start_location: e.start_location,
                            line_number: e.line_number,
                        })
                        .collect()
                })),
                jvmti::jvmtiError::ABSENT_INFORMATION => Ok(None),
                err => Err(JvmtiError::from(err)),
            }
        }
    }

    pub fn is_method_native(&mut self, method: &JMethodId) -> Result<bool, JvmtiError> {
        unsafe {
            let mut is_native: jni::jboolean = 0;
            let err = (*(*self.env).functions).IsMethodNative.unwrap()(
                self.env,
                method.method,
                &mut is_native,
            );
            if err != jvmti::jvmtiError::NONE {
                return Err(JvmtiError::from(err));
            }
            Ok(is_native != 0)
        }
    }
}

impl Drop for JvmtiEnv {
    fn drop(&mut self) {
        if !self.owned {
            return;
        }
        unsafe {
            let err = (*(*self.env).functions).DisposeEnvironment.unwrap()(self.env);
            if err != jvmti::jvmtiError::NONE {
                warn!("Failed to dispose of JVMTI environment: {}", JvmtiError::from(err));
            } else {
                debug!("Disposed of JVMTI environment");
            }
        }
    }
}

// A modified UTF-8 string allocated by the VM, deallocated on drop.
struct VmString {
    env: *mut jvmti::jvmtiEnv,
    ptr: *mut c_char,
}

impl VmString {
    fn new(env: *mut jvmti::jvmtiEnv, ptr: *mut c_char) -> VmString {
        VmString { env, ptr }
    }

    fn decode(&self) -> Result<Option<String>, crate::error::StringDecodeError> {
        unsafe { strings::from_modified_utf8(self.ptr) }
    }
}

impl Drop for VmString {
    fn drop(&mut self) {
        unsafe {
            if !self.ptr.is_null() {
                let err = (*(*self.env).functions).Deallocate.unwrap()(self.env, self.ptr as *mut _);
                if err != jvmti::jvmtiError::NONE {
                    warn!("Failed to deallocate VM owned string: {}", JvmtiError::from(err));
                }
            }
        }
    }
}

// A line number table allocated by the VM, deallocated on drop.
struct VmLineNumberTable {
    env: *mut jvmti::jvmtiEnv,
    ptr: *mut jvmti::jvmtiLineNumberEntry,
    entry_count: jni::jint,
}

impl VmLineNumberTable {
    fn new(env: *mut jvmti::jvmtiEnv, ptr: *mut jvmti::jvmtiLineNumberEntry, entry_count: jni::jint) -> VmLineNumberTable {
        VmLineNumberTable { env, ptr, entry_count }
    }

    fn as_slice(&self) -> Option<&[jvmti::jvmtiLineNumberEntry]> {
        unsafe {
            if self.entry_count == 0 || self.ptr.is_null() {
                return None;
            }
            Some(slice::from_raw_parts(self.ptr, self.entry_count as usize))
        }
    }
}

impl Drop for VmLineNumberTable {
    fn drop(&mut self) {
        unsafe {
            if !self.ptr.is_null() {
                let err = (*(*self.env).functions).Deallocate.unwrap()(self.env, self.ptr as *mut _);
                if err != jvmti::jvmtiError::NONE {
                    warn!("Failed to deallocate VM owned line number table: {}", JvmtiError::from(err));
                }
            }
        }
    }
}
