// jvmti-agent/src/sys/mod.rs
//
// Raw FFI declarations, split the way the JDK headers are.

pub mod cmlr;
pub mod jni;
pub mod jvmti;
