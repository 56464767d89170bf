// jvmti-agent/src/error.rs
//
// Error types for the safe layer. JNI and JVMTI status codes map onto
// enums carrying the wording of the interface documentation; operations
// that also decode VM-owned strings get their own error type so the
// failing part is visible in the chain.

use std::str::Utf8Error;
use std::string::FromUtf8Error;

use thiserror::Error;

use crate::sys::jni;
use crate::sys::jvmti;

/// Failures of the JNI invocation interface, `GetEnv` in particular.
#[derive(Error, Debug)]
pub enum JniError {
    #[error("Unknown JNI error")]
    UnknownError,
    #[error("A thread is detached from the VM")]
    ThreadDetachedFromVm,
    #[error("JNI version error")]
    JniVersionError,
    #[error("Not enough memory")]
    NotEnoughMemory,
    #[error("VM is already created")]
    VmAlreadyCreated,
    #[error("Invalid arguments")]
    InvalidArguments,
    #[error("Unsupported JNI error code: {0}")]
    UnsupportedError(i32),
}

impl From<jni::jint> for JniError {
    fn from(code: jni::jint) -> JniError {
        match code {
            jni::JNI_ERR => JniError::UnknownError,
            jni::JNI_EDETACHED => JniError::ThreadDetachedFromVm,
            jni::JNI_EVERSION => JniError::JniVersionError,
            jni::JNI_ENOMEM => JniError::NotEnoughMemory,
            jni::JNI_EEXIST => JniError::VmAlreadyCreated,
            jni::JNI_EINVAL => JniError::InvalidArguments,
            code => JniError::UnsupportedError(code),
        }
    }
}

/// A non-zero JVMTI status code.
#[derive(Error, Debug)]
pub enum JvmtiError {
    #[error("Invalid thread")]
    InvalidThread,
    #[error("Invalid thread group")]
    InvalidThreadGroup,
    #[error("Invalid priority")]
    InvalidPriority,
    #[error("Thread is not suspended")]
    ThreadNotSuspended,
    #[error("Thread is already suspended")]
    ThreadSuspended,
    #[error("Thread is not alive")]
    ThreadNotAlive,
    #[error("Invalid object")]
    InvalidObject,
    #[error("Invalid class")]
    InvalidClass,
    #[error("The class is not prepared yet")]
    ClassNotPrepared,
    #[error("Invalid method id")]
    InvalidMethodId,
    #[error("Invalid location")]
    InvalidLocation,
    #[error("Invalid field id")]
    InvalidFieldId,
    #[error("Invalid module")]
    InvalidModule,
    #[error("There are no more stack frames")]
    NoMoreFrames,
    #[error("No information is available about the stack frame")]
    OpaqueFrame,
    #[error("Variable type mismatch")]
    TypeMismatch,
    #[error("Invalid slot")]
    InvalidSlot,
    #[error("The item is already set")]
    Duplicate,
    #[error("Element is not found")]
    NotFound,
    #[error("Invalid raw monitor")]
    InvalidMonitor,
    #[error("The raw monitor is not owned by this thread")]
    NotMonitorOwner,
    #[error("The call has been interrupted")]
    Interrupt,
    #[error("Malformed class file")]
    InvalidClassFormat,
    #[error("Circular class definition")]
    CircularClassDefinition,
    #[error("The class fails verification")]
    FailsVerification,
    #[error("Class redefinition not possible, method addition is unsupported")]
    UnsupportedRedefinitionMethodAdded,
    #[error("Class redefinition not possible, field change is unsupported")]
    UnsupportedRedefinitionSchemaChanged,
    #[error("The thread state is inconsistent due to it having been modified")]
    InvalidTypeState,
    #[error("Class redefinition not possible, class hierarchy change is unsupported")]
    UnsupportedRedefinitionHierarchyChanged,
    #[error("Class redefinition not possible, method deletion is unsupported")]
    UnsupportedRedefinitionMethodDeleted,
    #[error("Class file version is unsupported")]
    UnsupportedVersion,
    #[error("Class names do not match")]
    NamesDontMatch,
    #[error("Class redefinition not possible, class modifiers change is unsupported")]
    UnsupportedRedefinitionClassModifiersChanged,
    #[error("Class redefinition not possible, method modifiers change is unsupported")]
    UnsupportedRedefinitionMethodModifiersChanged,
    #[error("Class redefinition not possible, class attribute change is unsupported")]
    UnsupportedRedefinitionClassAttributeChanged,
    #[error("The requested operation is unsupported")]
    UnsupportedOperation,
    #[error("The class is unmodifiable")]
    UnmodifiableClass,
    #[error("The module is unmodifiable")]
    UnmodifiableModule,
    #[error("The functionality is not available")]
    NotAvailable,
    #[error("This environment does not possess the required capability")]
    MustPossessCapability,
    #[error("Unexpected null pointer")]
    NullPointer,
    #[error("Information is not available")]
    AbsentInformation,
    #[error("Invalid event type")]
    InvalidEventType,
    #[error("Illegal argument")]
    IllegalArgument,
    #[error("Information is not available for native method")]
    NativeMethod,
    #[error("This class loader does not support the requested operation")]
    ClassLoaderUnsupported,
    #[error("Out of memory")]
    OutOfMemory,
    #[error("Access denied")]
    AccessDenied,
    #[error("The functionality is not available in the current phase")]
    WrongPhase,
    #[error("Unexpected internal error")]
    Internal,
    #[error("The thread is not attached to the virtual machine")]
    UnattachedThread,
    #[error("Invalid environment")]
    InvalidEnvironment,
    #[error("Unsupported JVMTI error code: {0}")]
    UnsupportedError(u32),
}

impl From<jvmti::jvmtiError> for JvmtiError {
    // Only reached on failure; NONE has no counterpart here.
    fn from(code: jvmti::jvmtiError) -> JvmtiError {
        use jvmti::jvmtiError::*;
        match code {
            INVALID_THREAD => JvmtiError::InvalidThread,
            INVALID_THREAD_GROUP => JvmtiError::InvalidThreadGroup,
            INVALID_PRIORITY => JvmtiError::InvalidPriority,
            THREAD_NOT_SUSPENDED => JvmtiError::ThreadNotSuspended,
            THREAD_SUSPENDED => JvmtiError::ThreadSuspended,
            THREAD_NOT_ALIVE => JvmtiError::ThreadNotAlive,
            INVALID_OBJECT => JvmtiError::InvalidObject,
            INVALID_CLASS => JvmtiError::InvalidClass,
            CLASS_NOT_PREPARED => JvmtiError::ClassNotPrepared,
            INVALID_METHODID => JvmtiError::InvalidMethodId,
            INVALID_LOCATION => JvmtiError::InvalidLocation,
            INVALID_FIELDID => JvmtiError::InvalidFieldId,
            INVALID_MODULE => JvmtiError::InvalidModule,
            NO_MORE_FRAMES => JvmtiError::NoMoreFrames,
            OPAQUE_FRAME => JvmtiError::OpaqueFrame,
            TYPE_MISMATCH => JvmtiError::TypeMismatch,
            INVALID_SLOT => JvmtiError::InvalidSlot,
            DUPLICATE => JvmtiError::Duplicate,
            NOT_FOUND => JvmtiError::NotFound,
            INVALID_MONITOR => JvmtiError::InvalidMonitor,
            NOT_MONITOR_OWNER => JvmtiError::NotMonitorOwner,
            INTERRUPT => JvmtiError::Interrupt,
            INVALID_CLASS_FORMAT => JvmtiError::InvalidClassFormat,
            CIRCULAR_CLASS_DEFINITION => JvmtiError::CircularClassDefinition,
            FAILS_VERIFICATION => JvmtiError::FailsVerification,
            UNSUPPORTED_REDEFINITION_METHOD_ADDED => JvmtiError::UnsupportedRedefinitionMethodAdded,
            UNSUPPORTED_REDEFINITION_SCHEMA_CHANGED => JvmtiError::UnsupportedRedefinitionSchemaChanged,
            INVALID_TYPESTATE => JvmtiError::InvalidTypeState,
            UNSUPPORTED_REDEFINITION_HIERARCHY_CHANGED => JvmtiError::UnsupportedRedefinitionHierarchyChanged,
            UNSUPPORTED_REDEFINITION_METHOD_DELETED => JvmtiError::UnsupportedRedefinitionMethodDeleted,
            UNSUPPORTED_VERSION => JvmtiError::UnsupportedVersion,
            NAMES_DONT_MATCH => JvmtiError::NamesDontMatch,
            UNSUPPORTED_REDEFINITION_CLASS_MODIFIERS_CHANGED => JvmtiError::UnsupportedRedefinitionClassModifiersChanged,
            UNSUPPORTED_REDEFINITION_METHOD_MODIFIERS_CHANGED => JvmtiError::UnsupportedRedefinitionMethodModifiersChanged,
            UNSUPPORTED_REDEFINITION_CLASS_ATTRIBUTE_CHANGED => JvmtiError::UnsupportedRedefinitionClassAttributeChanged,
            UNSUPPORTED_OPERATION => JvmtiError::UnsupportedOperation,
            UNMODIFIABLE_CLASS => JvmtiError::UnmodifiableClass,
            UNMODIFIABLE_MODULE => JvmtiError::UnmodifiableModule,
            NOT_AVAILABLE => JvmtiError::NotAvailable,
            MUST_POSSESS_CAPABILITY => JvmtiError::MustPossessCapability,
            NULL_POINTER => JvmtiError::NullPointer,
            ABSENT_INFORMATION => JvmtiError::AbsentInformation,
            INVALID_EVENT_TYPE => JvmtiError::InvalidEventType,
            ILLEGAL_ARGUMENT => JvmtiError::IllegalArgument,
            NATIVE_METHOD => JvmtiError::NativeMethod,
            CLASS_LOADER_UNSUPPORTED => JvmtiError::ClassLoaderUnsupported,
            OUT_OF_MEMORY => JvmtiError::OutOfMemory,
            ACCESS_DENIED => JvmtiError::AccessDenied,
            WRONG_PHASE => JvmtiError::WrongPhase,
            INTERNAL => JvmtiError::Internal,
            UNATTACHED_THREAD => JvmtiError::UnattachedThread,
            INVALID_ENVIRONMENT => JvmtiError::InvalidEnvironment,
            code => JvmtiError::UnsupportedError(code as u32),
        }
    }
}

/// Failure to turn a VM string into a Rust one.
#[derive(Error, Debug)]
pub enum StringDecodeError {
    #[error("Invalid modified UTF-8 encoding")]
    ModifiedUtf8Error,
    #[error("Invalid UTF-8 byte string: {0}")]
    FromUtf8Error(#[from] FromUtf8Error),
    #[error("Invalid UTF-8 byte string: {0}")]
    Utf8Error(#[from] Utf8Error),
}

#[derive(Error, Debug)]
pub enum GetMethodNameError {
    #[error("JVMTI method call error: {0}")]
    VmError(#[from] JvmtiError),
    #[error("Failed to decode method name: {0}")]
    NameDecodeError(#[source] StringDecodeError),
    #[error("Failed to decode method signature: {0}")]
    SignatureDecodeError(#[source] StringDecodeError),
    #[error("Failed to decode method generic signature: {0}")]
    GenericSignatureDecodeError(#[source] StringDecodeError),
}

#[derive(Error, Debug)]
pub enum GetClassSignatureError {
    #[error("JVMTI method call error: {0}")]
    VmError(#[from] JvmtiError),
    #[error("Failed to decode class signature: {0}")]
    SignatureDecodeError(#[source] StringDecodeError),
    #[error("Failed to decode class generic signature: {0}")]
    GenericSignatureDecodeError(#[source] StringDecodeError),
}

#[derive(Error, Debug)]
pub enum GetSourceFileNameError {
    #[error("JVMTI method call error: {0}")]
    VmError(#[from] JvmtiError),
    #[error("Failed to decode source file name: {0}")]
    SourceFileNameDecodeError(#[source] StringDecodeError),
}
