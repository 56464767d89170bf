// jvmti-agent/src/sys/jni.rs
//
// The slice of JNI this crate needs: primitive typedefs, reference handles,
// the jvalue union and the invocation interface an agent entry point is
// handed. The JNI function table itself is deliberately opaque; event
// callbacks receive a `*mut JNIEnv` and forward it untouched.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(dead_code)]

use std::os::raw::{c_char, c_void};

// =============================================================================
// Primitive types
// =============================================================================

pub type jboolean = u8;
pub type jbyte = i8;
pub type jchar = u16;
pub type jshort = i16;
pub type jint = i32;
pub type jlong = i64;
pub type jfloat = f32;
pub type jdouble = f64;
pub type jsize = jint;

pub const JNI_FALSE: jboolean = 0;
pub const JNI_TRUE: jboolean = 1;

// =============================================================================
// Reference types
// =============================================================================
//
// All object references are opaque pointers; the distinctions below are
// documentation the way the header's dummy-struct hierarchy is.

pub type jobject = *mut c_void;
pub type jclass = jobject;
pub type jthread = jobject;
pub type jstring = jobject;
pub type jthrowable = jobject;
pub type jarray = jobject;

pub type jmethodID = *mut c_void;
pub type jfieldID = *mut c_void;

/// Any Java value, as passed in call argument arrays and event payloads.
#[repr(C)]
#[derive(Copy, Clone)]
pub union jvalue {
    pub z: jboolean,
    pub b: jbyte,
    pub c: jchar,
    pub s: jshort,
    pub i: jint,
    pub j: jlong,
    pub f: jfloat,
    pub d: jdouble,
    pub l: jobject,
}

// =============================================================================
// Return codes
// =============================================================================

pub const JNI_OK: jint = 0;
pub const JNI_ERR: jint = -1;
pub const JNI_EDETACHED: jint = -2;
pub const JNI_EVERSION: jint = -3;
pub const JNI_ENOMEM: jint = -4;
pub const JNI_EEXIST: jint = -5;
pub const JNI_EINVAL: jint = -6;

// =============================================================================
// Version constants
// =============================================================================

pub const JNI_VERSION_1_1: jint = 0x00010001;
pub const JNI_VERSION_1_2: jint = 0x00010002;
pub const JNI_VERSION_1_4: jint = 0x00010004;
pub const JNI_VERSION_1_6: jint = 0x00010006;
pub const JNI_VERSION_1_8: jint = 0x00010008;
pub const JNI_VERSION_9: jint = 0x00090000;
pub const JNI_VERSION_10: jint = 0x000A0000;
pub const JNI_VERSION_19: jint = 0x00130000;
pub const JNI_VERSION_21: jint = 0x00150000;

// =============================================================================
// Environments
// =============================================================================

/// The JNI function table. Opaque here; this crate never calls through it.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct JNINativeInterface_ {
    _unused: [u8; 0],
}

pub type JNIEnv = *const JNINativeInterface_;

/// The invocation interface backing a `JavaVM`.
#[repr(C)]
pub struct JNIInvokeInterface_ {
    pub reserved0: *mut c_void,
    pub reserved1: *mut c_void,
    pub reserved2: *mut c_void,
    pub DestroyJavaVM: Option<unsafe extern "system" fn(vm: *mut JavaVM) -> jint>,
    pub AttachCurrentThread: Option<
        unsafe extern "system" fn(vm: *mut JavaVM, penv: *mut *mut c_void, args: *mut c_void) -> jint,
    >,
    pub DetachCurrentThread: Option<unsafe extern "system" fn(vm: *mut JavaVM) -> jint>,
    pub GetEnv: Option<
        unsafe extern "system" fn(vm: *mut JavaVM, penv: *mut *mut c_void, version: jint) -> jint,
    >,
    pub AttachCurrentThreadAsDaemon: Option<
        unsafe extern "system" fn(vm: *mut JavaVM, penv: *mut *mut c_void, args: *mut c_void) -> jint,
    >,
}

pub type JavaVM = *const JNIInvokeInterface_;

/// Arguments for attaching a native thread, as `AttachCurrentThread` expects.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct JavaVMAttachArgs {
    pub version: jint,
    pub name: *const c_char,
    pub group: jobject,
}
