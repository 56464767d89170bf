//! Common imports for building agents.
//!
//! The prelude is intentionally small. It covers the types most agents
//! touch while avoiding over-broad re-exports.

pub use crate::env::{
    ClassSignature, JClass, JLocation, JMethodId, JThread, Jvm, JvmtiEnv, JvmtiEvent,
    JvmtiEventMode, JvmtiVersion, LineNumberEntry, MethodName,
};
pub use crate::error::{JniError, JvmtiError};
pub use crate::export_agent;
pub use crate::records::{AddressLocationEntry, CompiledMethodLoadRecord, StackFrame, StackInfo};
pub use crate::sys::{jni, jvmti};
pub use crate::{Agent, EventSettings};
