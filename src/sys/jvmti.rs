// jvmti-agent/src/sys/jvmti.rs
//
// JVMTI (JVM Tool Interface) declarations for the agent glue layer.
// Hand-maintained against the JDK jvmti.h header; constant values and
// struct layouts are reproduced exactly as the header defines them.
//
// The function table has been stable since JDK 1.5. Newer JDKs fill
// reserved slots or append at the end:
//   - JDK 9:  GetAllModules (3), GetNamedModule (40), module functions (94-99)
//   - JDK 11: SetHeapSamplingInterval (156)
//   - JDK 21: SuspendAllVirtualThreads (118), ResumeAllVirtualThreads (119)
//   - JDK 25: ClearAllFramePops (67)
//
// Remaining reserved slots: 1, 105, 113, 117, 141.
//
// Slots this crate never dispatches keep their real arity, with struct
// parameters left as untyped pointers. Every function pointer slot has the
// same size, so the table layout is unaffected.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(dead_code)]

use std::fmt;
use std::os::raw::{c_char, c_uchar, c_void};

use crate::sys::jni::{
    jboolean, jclass, jdouble, jfieldID, jfloat, jint, jlong, jmethodID, jobject, jthread, jvalue,
    JNIEnv,
};

// =============================================================================
// Basic types
// =============================================================================

pub type jlocation = jlong;
pub type jthreadGroup = jobject;
pub type jrawMonitorID = *mut c_void;
pub type jvmtiEvent = u32;
pub type jvmtiEventMode = u32;

// =============================================================================
// Version constants
// =============================================================================

pub const JVMTI_VERSION_1_0: jint = 0x30010000;
pub const JVMTI_VERSION_1_1: jint = 0x30010100;
pub const JVMTI_VERSION_1_2: jint = 0x30010200;
pub const JVMTI_VERSION_9: jint = 0x30090000;
pub const JVMTI_VERSION_11: jint = 0x300B0000;
pub const JVMTI_VERSION_19: jint = 0x30130000;
pub const JVMTI_VERSION_21: jint = 0x30150000;

/// The version this crate is maintained against.
pub const JVMTI_VERSION: jint = JVMTI_VERSION_21;

// =============================================================================
// Event numbering
// =============================================================================
//
// The numbering has gaps at 72, 77-79 and 85; those positions are reserved
// in the header and stay reserved in the callback table below.

pub const JVMTI_MIN_EVENT_TYPE_VAL: jvmtiEvent = 50;

pub const JVMTI_EVENT_VM_INIT: jvmtiEvent = 50;
pub const JVMTI_EVENT_VM_DEATH: jvmtiEvent = 51;
pub const JVMTI_EVENT_THREAD_START: jvmtiEvent = 52;
pub const JVMTI_EVENT_THREAD_END: jvmtiEvent = 53;
pub const JVMTI_EVENT_CLASS_FILE_LOAD_HOOK: jvmtiEvent = 54;
pub const JVMTI_EVENT_CLASS_LOAD: jvmtiEvent = 55;
pub const JVMTI_EVENT_CLASS_PREPARE: jvmtiEvent = 56;
pub const JVMTI_EVENT_VM_START: jvmtiEvent = 57;
pub const JVMTI_EVENT_EXCEPTION: jvmtiEvent = 58;
pub const JVMTI_EVENT_EXCEPTION_CATCH: jvmtiEvent = 59;
pub const JVMTI_EVENT_SINGLE_STEP: jvmtiEvent = 60;
pub const JVMTI_EVENT_FRAME_POP: jvmtiEvent = 61;
pub const JVMTI_EVENT_BREAKPOINT: jvmtiEvent = 62;
pub const JVMTI_EVENT_FIELD_ACCESS: jvmtiEvent = 63;
pub const JVMTI_EVENT_FIELD_MODIFICATION: jvmtiEvent = 64;
pub const JVMTI_EVENT_METHOD_ENTRY: jvmtiEvent = 65;
pub const JVMTI_EVENT_METHOD_EXIT: jvmtiEvent = 66;
pub const JVMTI_EVENT_NATIVE_METHOD_BIND: jvmtiEvent = 67;
pub const JVMTI_EVENT_COMPILED_METHOD_LOAD: jvmtiEvent = 68;
pub const JVMTI_EVENT_COMPILED_METHOD_UNLOAD: jvmtiEvent = 69;
pub const JVMTI_EVENT_DYNAMIC_CODE_GENERATED: jvmtiEvent = 70;
pub const JVMTI_EVENT_DATA_DUMP_REQUEST: jvmtiEvent = 71;
pub const JVMTI_EVENT_MONITOR_WAIT: jvmtiEvent = 73;
pub const JVMTI_EVENT_MONITOR_WAITED: jvmtiEvent = 74;
pub const JVMTI_EVENT_MONITOR_CONTENDED_ENTER: jvmtiEvent = 75;
pub const JVMTI_EVENT_MONITOR_CONTENDED_ENTERED: jvmtiEvent = 76;
pub const JVMTI_EVENT_RESOURCE_EXHAUSTED: jvmtiEvent = 80;
pub const JVMTI_EVENT_GARBAGE_COLLECTION_START: jvmtiEvent = 81;
pub const JVMTI_EVENT_GARBAGE_COLLECTION_FINISH: jvmtiEvent = 82;
pub const JVMTI_EVENT_OBJECT_FREE: jvmtiEvent = 83;
pub const JVMTI_EVENT_VM_OBJECT_ALLOC: jvmtiEvent = 84;
pub const JVMTI_EVENT_SAMPLED_OBJECT_ALLOC: jvmtiEvent = 86;

pub const JVMTI_MAX_EVENT_TYPE_VAL: jvmtiEvent = 86;

// =============================================================================
// Event mode
// =============================================================================

pub const JVMTI_DISABLE: jvmtiEventMode = 0;
pub const JVMTI_ENABLE: jvmtiEventMode = 1;

// =============================================================================
// Resource exhaustion flags
// =============================================================================

pub const JVMTI_RESOURCE_EXHAUSTED_OOM_ERROR: jint = 0x0001;
pub const JVMTI_RESOURCE_EXHAUSTED_JAVA_HEAP: jint = 0x0002;
pub const JVMTI_RESOURCE_EXHAUSTED_THREADS: jint = 0x0004;

// =============================================================================
// Error codes
// =============================================================================

#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum jvmtiError {
    NONE = 0,
    INVALID_THREAD = 10,
    INVALID_THREAD_GROUP = 11,
    INVALID_PRIORITY = 12,
    THREAD_NOT_SUSPENDED = 13,
    THREAD_SUSPENDED = 14,
    THREAD_NOT_ALIVE = 15,
    INVALID_OBJECT = 20,
    INVALID_CLASS = 21,
    CLASS_NOT_PREPARED = 22,
    INVALID_METHODID = 23,
    INVALID_LOCATION = 24,
    INVALID_FIELDID = 25,
    INVALID_MODULE = 26,
    NO_MORE_FRAMES = 31,
    OPAQUE_FRAME = 32,
    TYPE_MISMATCH = 34,
    INVALID_SLOT = 35,
    DUPLICATE = 40,
    NOT_FOUND = 41,
    INVALID_MONITOR = 50,
    NOT_MONITOR_OWNER = 51,
    INTERRUPT = 52,
    INVALID_CLASS_FORMAT = 60,
    CIRCULAR_CLASS_DEFINITION = 61,
    FAILS_VERIFICATION = 62,
    UNSUPPORTED_REDEFINITION_METHOD_ADDED = 63,
    UNSUPPORTED_REDEFINITION_SCHEMA_CHANGED = 64,
    INVALID_TYPESTATE = 65,
    UNSUPPORTED_REDEFINITION_HIERARCHY_CHANGED = 66,
    UNSUPPORTED_REDEFINITION_METHOD_DELETED = 67,
    UNSUPPORTED_VERSION = 68,
    NAMES_DONT_MATCH = 69,
    UNSUPPORTED_REDEFINITION_CLASS_MODIFIERS_CHANGED = 70,
    UNSUPPORTED_REDEFINITION_METHOD_MODIFIERS_CHANGED = 71,
    UNSUPPORTED_REDEFINITION_CLASS_ATTRIBUTE_CHANGED = 72,
    UNSUPPORTED_OPERATION = 73, // JDK 21+
    UNMODIFIABLE_CLASS = 79,
    UNMODIFIABLE_MODULE = 80,
    NOT_AVAILABLE = 98,
    MUST_POSSESS_CAPABILITY = 99,
    NULL_POINTER = 100,
    ABSENT_INFORMATION = 101,
    INVALID_EVENT_TYPE = 102,
    ILLEGAL_ARGUMENT = 103,
    NATIVE_METHOD = 104,
    CLASS_LOADER_UNSUPPORTED = 106,
    OUT_OF_MEMORY = 110,
    ACCESS_DENIED = 111,
    WRONG_PHASE = 112,
    INTERNAL = 113,
    UNATTACHED_THREAD = 115,
    INVALID_ENVIRONMENT = 116,
}

pub const JVMTI_ERROR_MAX: u32 = 116;

// =============================================================================
// Auxiliary structs used by the dispatch surface
// =============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct jvmtiLineNumberEntry {
    pub start_location: jlocation,
    pub line_number: jint,
}

/// One row of the native-to-bytecode address map a JIT compiler reports
/// alongside a compiled method load.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct jvmtiAddrLocationMap {
    pub start_address: *const c_void,
    pub location: jlocation,
}

// =============================================================================
// Capabilities
// =============================================================================
//
// In C this is a struct of 1-bit fields padded to 128 bits. The flags are
// stored here as four little-endian 32-bit words, with bit N of the C
// declaration order at word N/32, bit N%32. Accessors carry their bit
// position in brackets so the layout can be checked against the header.

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct jvmtiCapabilities {
    bits: [u32; 4],
}

impl Default for jvmtiCapabilities {
    fn default() -> Self {
        Self { bits: [0; 4] }
    }
}

impl jvmtiCapabilities {
    fn set_bit(&mut self, bit_offset: usize, value: bool) {
        let word = bit_offset / 32;
        let bit = bit_offset % 32;
        if value {
            self.bits[word] |= 1 << bit;
        } else {
            self.bits[word] &= !(1 << bit);
        }
    }

    fn get_bit(&self, bit_offset: usize) -> bool {
        (self.bits[bit_offset / 32] & (1 << (bit_offset % 32))) != 0
    }

    /// True when no flag is set.
    pub fn is_empty(&self) -> bool {
        self.bits == [0; 4]
    }

    // [0]
    pub fn set_can_tag_objects(&mut self, v: bool) { self.set_bit(0, v); }
    pub fn can_tag_objects(&self) -> bool { self.get_bit(0) }

    // [1]
    pub fn set_can_generate_field_modification_events(&mut self, v: bool) { self.set_bit(1, v); }
    pub fn can_generate_field_modification_events(&self) -> bool { self.get_bit(1) }

    // [2]
    pub fn set_can_generate_field_access_events(&mut self, v: bool) { self.set_bit(2, v); }
    pub fn can_generate_field_access_events(&self) -> bool { self.get_bit(2) }

    // [3]
    pub fn set_can_get_bytecodes(&mut self, v: bool) { self.set_bit(3, v); }
    pub fn can_get_bytecodes(&self) -> bool { self.get_bit(3) }

    // [4]
    pub fn set_can_get_synthetic_attribute(&mut self, v: bool) { self.set_bit(4, v); }
    pub fn can_get_synthetic_attribute(&self) -> bool { self.get_bit(4) }

    // [5]
    pub fn set_can_get_owned_monitor_info(&mut self, v: bool) { self.set_bit(5, v); }
    pub fn can_get_owned_monitor_info(&self) -> bool { self.get_bit(5) }

    // [6]
    pub fn set_can_get_current_contended_monitor(&mut self, v: bool) { self.set_bit(6, v); }
    pub fn can_get_current_contended_monitor(&self) -> bool { self.get_bit(6) }

    // [7]
    pub fn set_can_get_monitor_info(&mut self, v: bool) { self.set_bit(7, v); }
    pub fn can_get_monitor_info(&self) -> bool { self.get_bit(7) }

    // [8]
    pub fn set_can_pop_frame(&mut self, v: bool) { self.set_bit(8, v); }
    pub fn can_pop_frame(&self) -> bool { self.get_bit(8) }

    // [9]
    pub fn set_can_redefine_classes(&mut self, v: bool) { self.set_bit(9, v); }
    pub fn can_redefine_classes(&self) -> bool { self.get_bit(9) }

    // [10]
    pub fn set_can_signal_thread(&mut self, v: bool) { self.set_bit(10, v); }
    pub fn can_signal_thread(&self) -> bool { self.get_bit(10) }

    // [11]
    pub fn set_can_get_source_file_name(&mut self, v: bool) { self.set_bit(11, v); }
    pub fn can_get_source_file_name(&self) -> bool { self.get_bit(11) }

    // [12]
    pub fn set_can_get_line_numbers(&mut self, v: bool) { self.set_bit(12, v); }
    pub fn can_get_line_numbers(&self) -> bool { self.get_bit(12) }

    // [13]
    pub fn set_can_get_source_debug_extension(&mut self, v: bool) { self.set_bit(13, v); }
    pub fn can_get_source_debug_extension(&self) -> bool { self.get_bit(13) }

    // [14]
    pub fn set_can_access_local_variables(&mut self, v: bool) { self.set_bit(14, v); }
    pub fn can_access_local_variables(&self) -> bool { self.get_bit(14) }

    // [15]
    pub fn set_can_maintain_original_method_order(&mut self, v: bool) { self.set_bit(15, v); }
    pub fn can_maintain_original_method_order(&self) -> bool { self.get_bit(15) }

    // [16]
    pub fn set_can_generate_single_step_events(&mut self, v: bool) { self.set_bit(16, v); }
    pub fn can_generate_single_step_events(&self) -> bool { self.get_bit(16) }

    // [17]
    pub fn set_can_generate_exception_events(&mut self, v: bool) { self.set_bit(17, v); }
    pub fn can_generate_exception_events(&self) -> bool { self.get_bit(17) }

    // [18]
    pub fn set_can_generate_frame_pop_events(&mut self, v: bool) { self.set_bit(18, v); }
    pub fn can_generate_frame_pop_events(&self) -> bool { self.get_bit(18) }

    // [19]
    pub fn set_can_generate_breakpoint_events(&mut self, v: bool) { self.set_bit(19, v); }
    pub fn can_generate_breakpoint_events(&self) -> bool { self.get_bit(19) }

    // [20]
    pub fn set_can_suspend(&mut self, v: bool) { self.set_bit(20, v); }
    pub fn can_suspend(&self) -> bool { self.get_bit(20) }

    // [21]
    pub fn set_can_redefine_any_class(&mut self, v: bool) { self.set_bit(21, v); }
    pub fn can_redefine_any_class(&self) -> bool { self.get_bit(21) }

    // [22]
    pub fn set_can_get_current_thread_cpu_time(&mut self, v: bool) { self.set_bit(22, v); }
    pub fn can_get_current_thread_cpu_time(&self) -> bool { self.get_bit(22) }

    // [23]
    pub fn set_can_get_thread_cpu_time(&mut self, v: bool) { self.set_bit(23, v); }
    pub fn can_get_thread_cpu_time(&self) -> bool { self.get_bit(23) }

    // [24]
    pub fn set_can_generate_method_entry_events(&mut self, v: bool) { self.set_bit(24, v); }
    pub fn can_generate_method_entry_events(&self) -> bool { self.get_bit(24) }

    // [25]
    pub fn set_can_generate_method_exit_events(&mut self, v: bool) { self.set_bit(25, v); }
    pub fn can_generate_method_exit_events(&self) -> bool { self.get_bit(25) }

    // [26]
    pub fn set_can_generate_all_class_hook_events(&mut self, v: bool) { self.set_bit(26, v); }
    pub fn can_generate_all_class_hook_events(&self) -> bool { self.get_bit(26) }

    // [27]
    pub fn set_can_generate_compiled_method_load_events(&mut self, v: bool) { self.set_bit(27, v); }
    pub fn can_generate_compiled_method_load_events(&self) -> bool { self.get_bit(27) }

    // [28]
    pub fn set_can_generate_monitor_events(&mut self, v: bool) { self.set_bit(28, v); }
    pub fn can_generate_monitor_events(&self) -> bool { self.get_bit(28) }

    // [29]
    pub fn set_can_generate_vm_object_alloc_events(&mut self, v: bool) { self.set_bit(29, v); }
    pub fn can_generate_vm_object_alloc_events(&self) -> bool { self.get_bit(29) }

    // [30]
    pub fn set_can_generate_native_method_bind_events(&mut self, v: bool) { self.set_bit(30, v); }
    pub fn can_generate_native_method_bind_events(&self) -> bool { self.get_bit(30) }

    // [31]
    pub fn set_can_generate_garbage_collection_events(&mut self, v: bool) { self.set_bit(31, v); }
    pub fn can_generate_garbage_collection_events(&self) -> bool { self.get_bit(31) }

    // [32]
    pub fn set_can_generate_object_free_events(&mut self, v: bool) { self.set_bit(32, v); }
    pub fn can_generate_object_free_events(&self) -> bool { self.get_bit(32) }

    // [33]
    pub fn set_can_force_early_return(&mut self, v: bool) { self.set_bit(33, v); }
    pub fn can_force_early_return(&self) -> bool { self.get_bit(33) }

    // [34]
    pub fn set_can_get_owned_monitor_stack_depth_info(&mut self, v: bool) { self.set_bit(34, v); }
    pub fn can_get_owned_monitor_stack_depth_info(&self) -> bool { self.get_bit(34) }

    // [35]
    pub fn set_can_get_constant_pool(&mut self, v: bool) { self.set_bit(35, v); }
    pub fn can_get_constant_pool(&self) -> bool { self.get_bit(35) }

    // [36]
    pub fn set_can_set_native_method_prefix(&mut self, v: bool) { self.set_bit(36, v); }
    pub fn can_set_native_method_prefix(&self) -> bool { self.get_bit(36) }

    // [37]
    pub fn set_can_retransform_classes(&mut self, v: bool) { self.set_bit(37, v); }
    pub fn can_retransform_classes(&self) -> bool { self.get_bit(37) }

    // [38]
    pub fn set_can_retransform_any_class(&mut self, v: bool) { self.set_bit(38, v); }
    pub fn can_retransform_any_class(&self) -> bool { self.get_bit(38) }

    // [39]
    pub fn set_can_generate_resource_exhaustion_heap_events(&mut self, v: bool) { self.set_bit(39, v); }
    pub fn can_generate_resource_exhaustion_heap_events(&self) -> bool { self.get_bit(39) }

    // [40]
    pub fn set_can_generate_resource_exhaustion_threads_events(&mut self, v: bool) { self.set_bit(40, v); }
    pub fn can_generate_resource_exhaustion_threads_events(&self) -> bool { self.get_bit(40) }

    // [41] (JDK 9+)
    pub fn set_can_generate_early_vmstart(&mut self, v: bool) { self.set_bit(41, v); }
    pub fn can_generate_early_vmstart(&self) -> bool { self.get_bit(41) }

    // [42] (JDK 9+)
    pub fn set_can_generate_early_class_hook_events(&mut self, v: bool) { self.set_bit(42, v); }
    pub fn can_generate_early_class_hook_events(&self) -> bool { self.get_bit(42) }

    // [43] (JDK 11+)
    pub fn set_can_generate_sampled_object_alloc_events(&mut self, v: bool) { self.set_bit(43, v); }
    pub fn can_generate_sampled_object_alloc_events(&self) -> bool { self.get_bit(43) }

    // [44] (JDK 21+)
    pub fn set_can_support_virtual_threads(&mut self, v: bool) { self.set_bit(44, v); }
    pub fn can_support_virtual_threads(&self) -> bool { self.get_bit(44) }
}

impl fmt::Display for jvmtiCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [&str; 45] = [
            "can_tag_objects",
            "can_generate_field_modification_events",
            "can_generate_field_access_events",
            "can_get_bytecodes",
            "can_get_synthetic_attribute",
            "can_get_owned_monitor_info",
            "can_get_current_contended_monitor",
            "can_get_monitor_info",
            "can_pop_frame",
            "can_redefine_classes",
            "can_signal_thread",
            "can_get_source_file_name",
            "can_get_line_numbers",
            "can_get_source_debug_extension",
            "can_access_local_variables",
            "can_maintain_original_method_order",
            "can_generate_single_step_events",
            "can_generate_exception_events",
            "can_generate_frame_pop_events",
            "can_generate_breakpoint_events",
            "can_suspend",
            "can_redefine_any_class",
            "can_get_current_thread_cpu_time",
            "can_get_thread_cpu_time",
            "can_generate_method_entry_events",
            "can_generate_method_exit_events",
            "can_generate_all_class_hook_events",
            "can_generate_compiled_method_load_events",
            "can_generate_monitor_events",
            "can_generate_vm_object_alloc_events",
            "can_generate_native_method_bind_events",
            "can_generate_garbage_collection_events",
            "can_generate_object_free_events",
            "can_force_early_return",
            "can_get_owned_monitor_stack_depth_info",
            "can_get_constant_pool",
            "can_set_native_method_prefix",
            "can_retransform_classes",
            "can_retransform_any_class",
            "can_generate_resource_exhaustion_heap_events",
            "can_generate_resource_exhaustion_threads_events",
            "can_generate_early_vmstart",
            "can_generate_early_class_hook_events",
            "can_generate_sampled_object_alloc_events",
            "can_support_virtual_threads",
        ];
        write!(f, "[")?;
        let mut first = true;
        for (bit, name) in NAMES.iter().enumerate() {
            if self.get_bit(bit) {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }
        write!(f, "]")
    }
}

// =============================================================================
// Event callback signatures
// =============================================================================
//
// One alias per event, wrapped in Option so a null table slot is expressible.
// Signatures match the header exactly; callbacks that the VM delivers without
// a JNI environment (compiled code, GC, object free) reflect that.

pub type jvmtiEventVMInit =
    Option<unsafe extern "system" fn(jvmti_env: *mut jvmtiEnv, jni_env: *mut JNIEnv, thread: jthread)>;
pub type jvmtiEventVMDeath =
    Option<unsafe extern "system" fn(jvmti_env: *mut jvmtiEnv, jni_env: *mut JNIEnv)>;
pub type jvmtiEventThreadStart =
    Option<unsafe extern "system" fn(jvmti_env: *mut jvmtiEnv, jni_env: *mut JNIEnv, thread: jthread)>;
pub type jvmtiEventThreadEnd =
    Option<unsafe extern "system" fn(jvmti_env: *mut jvmtiEnv, jni_env: *mut JNIEnv, thread: jthread)>;
pub type jvmtiEventClassFileLoadHook = Option<
    unsafe extern "system" fn(
        jvmti_env: *mut jvmtiEnv,
        jni_env: *mut JNIEnv,
        class_being_redefined: jclass,
        loader: jobject,
        name: *const c_char,
        protection_domain: jobject,
        class_data_len: jint,
        class_data: *const c_uchar,
        new_class_data_len: *mut jint,
        new_class_data: *mut *mut c_uchar,
    ),
>;
pub type jvmtiEventClassLoad = Option<
    unsafe extern "system" fn(jvmti_env: *mut jvmtiEnv, jni_env: *mut JNIEnv, thread: jthread, klass: jclass),
>;
pub type jvmtiEventClassPrepare = Option<
    unsafe extern "system" fn(jvmti_env: *mut jvmtiEnv, jni_env: *mut JNIEnv, thread: jthread, klass: jclass),
>;
pub type jvmtiEventVMStart =
    Option<unsafe extern "system" fn(jvmti_env: *mut jvmtiEnv, jni_env: *mut JNIEnv)>;
pub type jvmtiEventException = Option<
    unsafe extern "system" fn(
        jvmti_env: *mut jvmtiEnv,
        jni_env: *mut JNIEnv,
        thread: jthread,
        method: jmethodID,
        location: jlocation,
        exception: jobject,
        catch_method: jmethodID,
        catch_location: jlocation,
    ),
>;
pub type jvmtiEventExceptionCatch = Option<
    unsafe extern "system" fn(
        jvmti_env: *mut jvmtiEnv,
        jni_env: *mut JNIEnv,
        thread: jthread,
        method: jmethodID,
        location: jlocation,
        exception: jobject,
    ),
>;
pub type jvmtiEventSingleStep = Option<
    unsafe extern "system" fn(
        jvmti_env: *mut jvmtiEnv,
        jni_env: *mut JNIEnv,
        thread: jthread,
        method: jmethodID,
        location: jlocation,
    ),
>;
pub type jvmtiEventFramePop = Option<
    unsafe extern "system" fn(
        jvmti_env: *mut jvmtiEnv,
        jni_env: *mut JNIEnv,
        thread: jthread,
        method: jmethodID,
        was_popped_by_exception: jboolean,
    ),
>;
pub type jvmtiEventBreakpoint = Option<
    unsafe extern "system" fn(
        jvmti_env: *mut jvmtiEnv,
        jni_env: *mut JNIEnv,
        thread: jthread,
        method: jmethodID,
        location: jlocation,
    ),
>;
pub type jvmtiEventFieldAccess = Option<
    unsafe extern "system" fn(
        jvmti_env: *mut jvmtiEnv,
        jni_env: *mut JNIEnv,
        thread: jthread,
        method: jmethodID,
        location: jlocation,
        field_klass: jclass,
        object: jobject,
        field: jfieldID,
    ),
>;
pub type jvmtiEventFieldModification = Option<
    unsafe extern "system" fn(
        jvmti_env: *mut jvmtiEnv,
        jni_env: *mut JNIEnv,
        thread: jthread,
        method: jmethodID,
        location: jlocation,
        field_klass: jclass,
        object: jobject,
        field: jfieldID,
        signature_type: c_char,
        new_value: jvalue,
    ),
>;
pub type jvmtiEventMethodEntry = Option<
    unsafe extern "system" fn(jvmti_env: *mut jvmtiEnv, jni_env: *mut JNIEnv, thread: jthread, method: jmethodID),
>;
pub type jvmtiEventMethodExit = Option<
    unsafe extern "system" fn(
        jvmti_env: *mut jvmtiEnv,
        jni_env: *mut JNIEnv,
        thread: jthread,
        method: jmethodID,
        was_popped_by_exception: jboolean,
        return_value: jvalue,
    ),
>;
pub type jvmtiEventNativeMethodBind = Option<
    unsafe extern "system" fn(
        jvmti_env: *mut jvmtiEnv,
        jni_env: *mut JNIEnv,
        thread: jthread,
        method: jmethodID,
        address: *mut c_void,
        new_address_ptr: *mut *mut c_void,
    ),
>;
pub type jvmtiEventCompiledMethodLoad = Option<
    unsafe extern "system" fn(
        jvmti_env: *mut jvmtiEnv,
        method: jmethodID,
        code_size: jint,
        code_addr: *const c_void,
        map_length: jint,
        map: *const jvmtiAddrLocationMap,
        compile_info: *const c_void,
    ),
>;
pub type jvmtiEventCompiledMethodUnload = Option<
    unsafe extern "system" fn(jvmti_env: *mut jvmtiEnv, method: jmethodID, code_addr: *const c_void),
>;
pub type jvmtiEventDynamicCodeGenerated = Option<
    unsafe extern "system" fn(
        jvmti_env: *mut jvmtiEnv,
        name: *const c_char,
        address: *const c_void,
        length: jint,
    ),
>;
pub type jvmtiEventDataDumpRequest = Option<unsafe extern "system" fn(jvmti_env: *mut jvmtiEnv)>;
pub type jvmtiEventMonitorWait = Option<
    unsafe extern "system" fn(
        jvmti_env: *mut jvmtiEnv,
        jni_env: *mut JNIEnv,
        thread: jthread,
        object: jobject,
        timeout: jlong,
    ),
>;
pub type jvmtiEventMonitorWaited = Option<
    unsafe extern "system" fn(
        jvmti_env: *mut jvmtiEnv,
        jni_env: *mut JNIEnv,
        thread: jthread,
        object: jobject,
        timed_out: jboolean,
    ),
>;
pub type jvmtiEventMonitorContendedEnter = Option<
    unsafe extern "system" fn(jvmti_env: *mut jvmtiEnv, jni_env: *mut JNIEnv, thread: jthread, object: jobject),
>;
pub type jvmtiEventMonitorContendedEntered = Option<
    unsafe extern "system" fn(jvmti_env: *mut jvmtiEnv, jni_env: *mut JNIEnv, thread: jthread, object: jobject),
>;
pub type jvmtiEventResourceExhausted = Option<
    unsafe extern "system" fn(
        jvmti_env: *mut jvmtiEnv,
        jni_env: *mut JNIEnv,
        flags: jint,
        reserved: *const c_void,
        description: *const c_char,
    ),
>;
pub type jvmtiEventGarbageCollectionStart = Option<unsafe extern "system" fn(jvmti_env: *mut jvmtiEnv)>;
pub type jvmtiEventGarbageCollectionFinish = Option<unsafe extern "system" fn(jvmti_env: *mut jvmtiEnv)>;
pub type jvmtiEventObjectFree = Option<unsafe extern "system" fn(jvmti_env: *mut jvmtiEnv, tag: jlong)>;
pub type jvmtiEventVMObjectAlloc = Option<
    unsafe extern "system" fn(
        jvmti_env: *mut jvmtiEnv,
        jni_env: *mut JNIEnv,
        thread: jthread,
        object: jobject,
        object_klass: jclass,
        size: jlong,
    ),
>;
pub type jvmtiEventSampledObjectAlloc = Option<
    unsafe extern "system" fn(
        jvmti_env: *mut jvmtiEnv,
        jni_env: *mut JNIEnv,
        thread: jthread,
        object: jobject,
        object_klass: jclass,
        size: jlong,
    ),
>;
pub type jvmtiEventReserved = Option<unsafe extern "system" fn()>;

// =============================================================================
// Event callback table
// =============================================================================
//
// Field order is the event numbering; reserved positions keep their place.
// SetEventCallbacks takes the struct size, so a table ending at event 86
// stays valid on newer VMs.

#[repr(C)]
#[derive(Copy, Clone, Default)]
pub struct jvmtiEventCallbacks {
    /* 50 : VM Initialization Event */
    pub VMInit: jvmtiEventVMInit,
    /* 51 : VM Death Event */
    pub VMDeath: jvmtiEventVMDeath,
    /* 52 : Thread Start */
    pub ThreadStart: jvmtiEventThreadStart,
    /* 53 : Thread End */
    pub ThreadEnd: jvmtiEventThreadEnd,
    /* 54 : Class File Load Hook */
    pub ClassFileLoadHook: jvmtiEventClassFileLoadHook,
    /* 55 : Class Load */
    pub ClassLoad: jvmtiEventClassLoad,
    /* 56 : Class Prepare */
    pub ClassPrepare: jvmtiEventClassPrepare,
    /* 57 : VM Start Event */
    pub VMStart: jvmtiEventVMStart,
    /* 58 : Exception */
    pub Exception: jvmtiEventException,
    /* 59 : Exception Catch */
    pub ExceptionCatch: jvmtiEventExceptionCatch,
    /* 60 : Single Step */
    pub SingleStep: jvmtiEventSingleStep,
    /* 61 : Frame Pop */
    pub FramePop: jvmtiEventFramePop,
    /* 62 : Breakpoint */
    pub Breakpoint: jvmtiEventBreakpoint,
    /* 63 : Field Access */
    pub FieldAccess: jvmtiEventFieldAccess,
    /* 64 : Field Modification */
    pub FieldModification: jvmtiEventFieldModification,
    /* 65 : Method Entry */
    pub MethodEntry: jvmtiEventMethodEntry,
    /* 66 : Method Exit */
    pub MethodExit: jvmtiEventMethodExit,
    /* 67 : Native Method Bind */
    pub NativeMethodBind: jvmtiEventNativeMethodBind,
    /* 68 : Compiled Method Load */
    pub CompiledMethodLoad: jvmtiEventCompiledMethodLoad,
    /* 69 : Compiled Method Unload */
    pub CompiledMethodUnload: jvmtiEventCompiledMethodUnload,
    /* 70 : Dynamic Code Generated */
    pub DynamicCodeGenerated: jvmtiEventDynamicCodeGenerated,
    /* 71 : Data Dump Request */
    pub DataDumpRequest: jvmtiEventDataDumpRequest,
    /* 72 */
    pub reserved72: jvmtiEventReserved,
    /* 73 : Monitor Wait */
    pub MonitorWait: jvmtiEventMonitorWait,
    /* 74 : Monitor Waited */
    pub MonitorWaited: jvmtiEventMonitorWaited,
    /* 75 : Monitor Contended Enter */
    pub MonitorContendedEnter: jvmtiEventMonitorContendedEnter,
    /* 76 : Monitor Contended Entered */
    pub MonitorContendedEntered: jvmtiEventMonitorContendedEntered,
    /* 77 */
    pub reserved77: jvmtiEventReserved,
    /* 78 */
    pub reserved78: jvmtiEventReserved,
    /* 79 */
    pub reserved79: jvmtiEventReserved,
    /* 80 : Resource Exhausted */
    pub ResourceExhausted: jvmtiEventResourceExhausted,
    /* 81 : Garbage Collection Start */
    pub GarbageCollectionStart: jvmtiEventGarbageCollectionStart,
    /* 82 : Garbage Collection Finish */
    pub GarbageCollectionFinish: jvmtiEventGarbageCollectionFinish,
    /* 83 : Object Free */
    pub ObjectFree: jvmtiEventObjectFree,
    /* 84 : VM Object Allocation */
    pub VMObjectAlloc: jvmtiEventVMObjectAlloc,
    /* 85 */
    pub reserved85: jvmtiEventReserved,
    /* 86 : Sampled Object Allocation */
    pub SampledObjectAlloc: jvmtiEventSampledObjectAlloc,
}

/// Number of function-pointer slots in [`jvmtiEventCallbacks`].
pub const JVMTI_EVENT_CALLBACK_SLOTS: usize = 37;

// =============================================================================
// The JVMTI function table
// =============================================================================
//
// 156 slots, dispatched through `jvmtiEnv`. Signatures for the slots this
// crate calls are fully typed; the rest keep the header's arity with struct
// parameters as untyped pointers.

#[repr(C)]
pub struct jvmtiInterface_1_ {
    /* 1 : RESERVED */
    pub reserved1: *mut c_void,
    /* 2 : Set Event Notification Mode */
    pub SetEventNotificationMode: Option<
        unsafe extern "C" fn(
            env: *mut jvmtiEnv,
            mode: jvmtiEventMode,
            event_type: jvmtiEvent,
            event_thread: jthread,
            ...
        ) -> jvmtiError,
    >,
    /* 3 : Get All Modules */
    pub GetAllModules: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, module_count_ptr: *mut jint, modules_ptr: *mut *mut jobject) -> jvmtiError,
    >,
    /* 4 : Get All Threads */
    pub GetAllThreads: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, threads_count_ptr: *mut jint, threads_ptr: *mut *mut jthread) -> jvmtiError,
    >,
    /* 5 : Suspend Thread */
    pub SuspendThread: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread) -> jvmtiError>,
    /* 6 : Resume Thread */
    pub ResumeThread: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread) -> jvmtiError>,
    /* 7 : Stop Thread */
    pub StopThread: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, exception: jobject) -> jvmtiError>,
    /* 8 : Interrupt Thread */
    pub InterruptThread: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread) -> jvmtiError>,
    /* 9 : Get Thread Info */
    pub GetThreadInfo: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, info_ptr: *mut c_void) -> jvmtiError>,
    /* 10 : Get Owned Monitor Info */
    pub GetOwnedMonitorInfo: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, owned_monitor_count_ptr: *mut jint, owned_monitors_ptr: *mut *mut jobject) -> jvmtiError,
    >,
    /* 11 : Get Current Contended Monitor */
    pub GetCurrentContendedMonitor: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, monitor_ptr: *mut jobject) -> jvmtiError,
    >,
    /* 12 : Run Agent Thread */
    pub RunAgentThread: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, proc_: *mut c_void, arg: *const c_void, priority: jint) -> jvmtiError,
    >,
    /* 13 : Get Top Thread Groups */
    pub GetTopThreadGroups: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, group_count_ptr: *mut jint, groups_ptr: *mut *mut jthreadGroup) -> jvmtiError,
    >,
    /* 14 : Get Thread Group Info */
    pub GetThreadGroupInfo: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, group: jthreadGroup, info_ptr: *mut c_void) -> jvmtiError,
    >,
    /* 15 : Get Thread Group Children */
    pub GetThreadGroupChildren: Option<
        unsafe extern "system" fn(
            env: *mut jvmtiEnv,
            group: jthreadGroup,
            thread_count_ptr: *mut jint,
            threads_ptr: *mut *mut jthread,
            group_count_ptr: *mut jint,
            groups_ptr: *mut *mut jthreadGroup,
        ) -> jvmtiError,
    >,
    /* 16 : Get Frame Count */
    pub GetFrameCount: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, count_ptr: *mut jint) -> jvmtiError>,
    /* 17 : Get Thread State */
    pub GetThreadState: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, thread_state_ptr: *mut jint) -> jvmtiError>,
    /* 18 : Get Current Thread */
    pub GetCurrentThread: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, thread_ptr: *mut jthread) -> jvmtiError>,
    /* 19 : Get Frame Location */
    pub GetFrameLocation: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, depth: jint, method_ptr: *mut jmethodID, location_ptr: *mut jlocation) -> jvmtiError,
    >,
    /* 20 : Notify Frame Pop */
    pub NotifyFramePop: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, depth: jint) -> jvmtiError>,
    /* 21 : Get Local Variable - Object */
    pub GetLocalObject: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, depth: jint, slot: jint, value_ptr: *mut jobject) -> jvmtiError,
    >,
    /* 22 : Get Local Variable - Int */
    pub GetLocalInt: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, depth: jint, slot: jint, value_ptr: *mut jint) -> jvmtiError,
    >,
    /* 23 : Get Local Variable - Long */
    pub GetLocalLong: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, depth: jint, slot: jint, value_ptr: *mut jlong) -> jvmtiError,
    >,
    /* 24 : Get Local Variable - Float */
    pub GetLocalFloat: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, depth: jint, slot: jint, value_ptr: *mut jfloat) -> jvmtiError,
    >,
    /* 25 : Get Local Variable - Double */
    pub GetLocalDouble: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, depth: jint, slot: jint, value_ptr: *mut jdouble) -> jvmtiError,
    >,
    /* 26 : Set Local Variable - Object */
    pub SetLocalObject: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, depth: jint, slot: jint, value: jobject) -> jvmtiError,
    >,
    /* 27 : Set Local Variable - Int */
    pub SetLocalInt: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, depth: jint, slot: jint, value: jint) -> jvmtiError,
    >,
    /* 28 : Set Local Variable - Long */
    pub SetLocalLong: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, depth: jint, slot: jint, value: jlong) -> jvmtiError,
    >,
    /* 29 : Set Local Variable - Float */
    pub SetLocalFloat: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, depth: jint, slot: jint, value: jfloat) -> jvmtiError,
    >,
    /* 30 : Set Local Variable - Double */
    pub SetLocalDouble: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, depth: jint, slot: jint, value: jdouble) -> jvmtiError,
    >,
    /* 31 : Create Raw Monitor */
    pub CreateRawMonitor: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, name: *const c_char, monitor_ptr: *mut jrawMonitorID) -> jvmtiError,
    >,
    /* 32 : Destroy Raw Monitor */
    pub DestroyRawMonitor: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, monitor: jrawMonitorID) -> jvmtiError>,
    /* 33 : Raw Monitor Enter */
    pub RawMonitorEnter: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, monitor: jrawMonitorID) -> jvmtiError>,
    /* 34 : Raw Monitor Exit */
    pub RawMonitorExit: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, monitor: jrawMonitorID) -> jvmtiError>,
    /* 35 : Raw Monitor Wait */
    pub RawMonitorWait: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, monitor: jrawMonitorID, millis: jlong) -> jvmtiError>,
    /* 36 : Raw Monitor Notify */
    pub RawMonitorNotify: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, monitor: jrawMonitorID) -> jvmtiError>,
    /* 37 : Raw Monitor Notify All */
    pub RawMonitorNotifyAll: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, monitor: jrawMonitorID) -> jvmtiError>,
    /* 38 : Set Breakpoint */
    pub SetBreakpoint: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, method: jmethodID, location: jlocation) -> jvmtiError>,
    /* 39 : Clear Breakpoint */
    pub ClearBreakpoint: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, method: jmethodID, location: jlocation) -> jvmtiError>,
    /* 40 : Get Named Module */
    pub GetNamedModule: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, class_loader: jobject, package_name: *const c_char, module_ptr: *mut jobject) -> jvmtiError,
    >,
    /* 41 : Set Field Access Watch */
    pub SetFieldAccessWatch: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, field: jfieldID) -> jvmtiError>,
    /* 42 : Clear Field Access Watch */
    pub ClearFieldAccessWatch: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, field: jfieldID) -> jvmtiError>,
    /* 43 : Set Field Modification Watch */
    pub SetFieldModificationWatch: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, field: jfieldID) -> jvmtiError>,
    /* 44 : Clear Field Modification Watch */
    pub ClearFieldModificationWatch: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, field: jfieldID) -> jvmtiError>,
    /* 45 : Is Modifiable Class */
    pub IsModifiableClass: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, is_modifiable_class_ptr: *mut jboolean) -> jvmtiError,
    >,
    /* 46 : Allocate */
    pub Allocate: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, size: jlong, mem_ptr: *mut *mut c_uchar) -> jvmtiError>,
    /* 47 : Deallocate */
    pub Deallocate: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, mem: *mut c_uchar) -> jvmtiError>,
    /* 48 : Get Class Signature */
    pub GetClassSignature: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, signature_ptr: *mut *mut c_char, generic_ptr: *mut *mut c_char) -> jvmtiError,
    >,
    /* 49 : Get Class Status */
    pub GetClassStatus: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, status_ptr: *mut jint) -> jvmtiError>,
    /* 50 : Get Source File Name */
    pub GetSourceFileName: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, source_name_ptr: *mut *mut c_char) -> jvmtiError,
    >,
    /* 51 : Get Class Modifiers */
    pub GetClassModifiers: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, modifiers_ptr: *mut jint) -> jvmtiError>,
    /* 52 : Get Class Methods */
    pub GetClassMethods: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, method_count_ptr: *mut jint, methods_ptr: *mut *mut jmethodID) -> jvmtiError,
    >,
    /* 53 : Get Class Fields */
    pub GetClassFields: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, field_count_ptr: *mut jint, fields_ptr: *mut *mut jfieldID) -> jvmtiError,
    >,
    /* 54 : Get Implemented Interfaces */
    pub GetImplementedInterfaces: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, interface_count_ptr: *mut jint, interfaces_ptr: *mut *mut jclass) -> jvmtiError,
    >,
    /* 55 : Is Interface */
    pub IsInterface: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, is_interface_ptr: *mut jboolean) -> jvmtiError>,
    /* 56 : Is Array Class */
    pub IsArrayClass: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, is_array_class_ptr: *mut jboolean) -> jvmtiError>,
    /* 57 : Get Class Loader */
    pub GetClassLoader: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, classloader_ptr: *mut jobject) -> jvmtiError>,
    /* 58 : Get Object Hash Code */
    pub GetObjectHashCode: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, object: jobject, hash_code_ptr: *mut jint) -> jvmtiError>,
    /* 59 : Get Object Monitor Usage */
    pub GetObjectMonitorUsage: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, object: jobject, info_ptr: *mut c_void) -> jvmtiError>,
    /* 60 : Get Field Name (and Signature) */
    pub GetFieldName: Option<
        unsafe extern "system" fn(
            env: *mut jvmtiEnv,
            klass: jclass,
            field: jfieldID,
            name_ptr: *mut *mut c_char,
            signature_ptr: *mut *mut c_char,
            generic_ptr: *mut *mut c_char,
        ) -> jvmtiError,
    >,
    /* 61 : Get Field Declaring Class */
    pub GetFieldDeclaringClass: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, field: jfieldID, declaring_class_ptr: *mut jclass) -> jvmtiError,
    >,
    /* 62 : Get Field Modifiers */
    pub GetFieldModifiers: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, field: jfieldID, modifiers_ptr: *mut jint) -> jvmtiError,
    >,
    /* 63 : Is Field Synthetic */
    pub IsFieldSynthetic: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, field: jfieldID, is_synthetic_ptr: *mut jboolean) -> jvmtiError,
    >,
    /* 64 : Get Method Name (and Signature) */
    pub GetMethodName: Option<
        unsafe extern "system" fn(
            env: *mut jvmtiEnv,
            method: jmethodID,
            name_ptr: *mut *mut c_char,
            signature_ptr: *mut *mut c_char,
            generic_ptr: *mut *mut c_char,
        ) -> jvmtiError,
    >,
    /* 65 : Get Method Declaring Class */
    pub GetMethodDeclaringClass: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, method: jmethodID, declaring_class_ptr: *mut jclass) -> jvmtiError,
    >,
    /* 66 : Get Method Modifiers */
    pub GetMethodModifiers: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, method: jmethodID, modifiers_ptr: *mut jint) -> jvmtiError,
    >,
    /* 67 : Clear All Frame Pops */
    pub ClearAllFramePops: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread) -> jvmtiError>,
    /* 68 : Get Max Locals */
    pub GetMaxLocals: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, method: jmethodID, max_ptr: *mut jint) -> jvmtiError>,
    /* 69 : Get Arguments Size */
    pub GetArgumentsSize: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, method: jmethodID, size_ptr: *mut jint) -> jvmtiError>,
    /* 70 : Get Line Number Table */
    pub GetLineNumberTable: Option<
        unsafe extern "system" fn(
            env: *mut jvmtiEnv,
            method: jmethodID,
            entry_count_ptr: *mut jint,
            table_ptr: *mut *mut jvmtiLineNumberEntry,
        ) -> jvmtiError,
    >,
    /* 71 : Get Method Location */
    pub GetMethodLocation: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, method: jmethodID, start_location_ptr: *mut jlocation, end_location_ptr: *mut jlocation) -> jvmtiError,
    >,
    /* 72 : Get Local Variable Table */
    pub GetLocalVariableTable: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, method: jmethodID, entry_count_ptr: *mut jint, table_ptr: *mut *mut c_void) -> jvmtiError,
    >,
    /* 73 : Set Native Method Prefix */
    pub SetNativeMethodPrefix: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, prefix: *const c_char) -> jvmtiError>,
    /* 74 : Set Native Method Prefixes */
    pub SetNativeMethodPrefixes: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, prefix_count: jint, prefixes: *mut *mut c_char) -> jvmtiError,
    >,
    /* 75 : Get Bytecodes */
    pub GetBytecodes: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, method: jmethodID, bytecode_count_ptr: *mut jint, bytecodes_ptr: *mut *mut c_uchar) -> jvmtiError,
    >,
    /* 76 : Is Method Native */
    pub IsMethodNative: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, method: jmethodID, is_native_ptr: *mut jboolean) -> jvmtiError,
    >,
    /* 77 : Is Method Synthetic */
    pub IsMethodSynthetic: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, method: jmethodID, is_synthetic_ptr: *mut jboolean) -> jvmtiError,
    >,
    /* 78 : Get Loaded Classes */
    pub GetLoadedClasses: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, class_count_ptr: *mut jint, classes_ptr: *mut *mut jclass) -> jvmtiError,
    >,
    /* 79 : Get Classloader Classes */
    pub GetClassLoaderClasses: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, initiating_loader: jobject, class_count_ptr: *mut jint, classes_ptr: *mut *mut jclass) -> jvmtiError,
    >,
    /* 80 : Pop Frame */
    pub PopFrame: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread) -> jvmtiError>,
    /* 81 : Force Early Return - Object */
    pub ForceEarlyReturnObject: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, value: jobject) -> jvmtiError>,
    /* 82 : Force Early Return - Int */
    pub ForceEarlyReturnInt: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, value: jint) -> jvmtiError>,
    /* 83 : Force Early Return - Long */
    pub ForceEarlyReturnLong: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, value: jlong) -> jvmtiError>,
    /* 84 : Force Early Return - Float */
    pub ForceEarlyReturnFloat: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, value: jfloat) -> jvmtiError>,
    /* 85 : Force Early Return - Double */
    pub ForceEarlyReturnDouble: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, value: jdouble) -> jvmtiError>,
    /* 86 : Force Early Return - Void */
    pub ForceEarlyReturnVoid: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread) -> jvmtiError>,
    /* 87 : Redefine Classes */
    pub RedefineClasses: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, class_count: jint, class_definitions: *const c_void) -> jvmtiError,
    >,
    /* 88 : Get Version Number */
    pub GetVersionNumber: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, version_ptr: *mut jint) -> jvmtiError>,
    /* 89 : Get Capabilities */
    pub GetCapabilities: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, capabilities_ptr: *mut jvmtiCapabilities) -> jvmtiError,
    >,
    /* 90 : Get Source Debug Extension */
    pub GetSourceDebugExtension: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, source_debug_extension_ptr: *mut *mut c_char) -> jvmtiError,
    >,
    /* 91 : Is Method Obsolete */
    pub IsMethodObsolete: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, method: jmethodID, is_obsolete_ptr: *mut jboolean) -> jvmtiError,
    >,
    /* 92 : Suspend Thread List */
    pub SuspendThreadList: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, request_count: jint, request_list: *const jthread, results: *mut jvmtiError) -> jvmtiError,
    >,
    /* 93 : Resume Thread List */
    pub ResumeThreadList: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, request_count: jint, request_list: *const jthread, results: *mut jvmtiError) -> jvmtiError,
    >,
    /* 94 : Add Module Reads */
    pub AddModuleReads: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, module: jobject, to_module: jobject) -> jvmtiError>,
    /* 95 : Add Module Exports */
    pub AddModuleExports: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, module: jobject, pkg_name: *const c_char, to_module: jobject) -> jvmtiError,
    >,
    /* 96 : Add Module Opens */
    pub AddModuleOpens: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, module: jobject, pkg_name: *const c_char, to_module: jobject) -> jvmtiError,
    >,
    /* 97 : Add Module Uses */
    pub AddModuleUses: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, module: jobject, service: jclass) -> jvmtiError>,
    /* 98 : Add Module Provides */
    pub AddModuleProvides: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, module: jobject, service: jclass, impl_class: jclass) -> jvmtiError,
    >,
    /* 99 : Is Modifiable Module */
    pub IsModifiableModule: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, module: jobject, is_modifiable_module_ptr: *mut jboolean) -> jvmtiError,
    >,
    /* 100 : Get All Stack Traces */
    pub GetAllStackTraces: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, max_frame_count: jint, stack_info_ptr: *mut *mut c_void, thread_count_ptr: *mut jint) -> jvmtiError,
    >,
    /* 101 : Get Thread List Stack Traces */
    pub GetThreadListStackTraces: Option<
        unsafe extern "system" fn(
            env: *mut jvmtiEnv,
            thread_count: jint,
            thread_list: *const jthread,
            max_frame_count: jint,
            stack_info_ptr: *mut *mut c_void,
        ) -> jvmtiError,
    >,
    /* 102 : Get Thread Local Storage */
    pub GetThreadLocalStorage: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, data_ptr: *mut *mut c_void) -> jvmtiError,
    >,
    /* 103 : Set Thread Local Storage */
    pub SetThreadLocalStorage: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, data: *const c_void) -> jvmtiError,
    >,
    /* 104 : Get Stack Trace */
    pub GetStackTrace: Option<
        unsafe extern "system" fn(
            env: *mut jvmtiEnv,
            thread: jthread,
            start_depth: jint,
            max_frame_count: jint,
            frame_buffer: *mut c_void,
            count_ptr: *mut jint,
        ) -> jvmtiError,
    >,
    /* 105 : RESERVED */
    pub reserved105: *mut c_void,
    /* 106 : Get Tag */
    pub GetTag: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, object: jobject, tag_ptr: *mut jlong) -> jvmtiError>,
    /* 107 : Set Tag */
    pub SetTag: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, object: jobject, tag: jlong) -> jvmtiError>,
    /* 108 : Force Garbage Collection */
    pub ForceGarbageCollection: Option<unsafe extern "system" fn(env: *mut jvmtiEnv) -> jvmtiError>,
    /* 109 : Iterate Over Objects Reachable From Object */
    pub IterateOverObjectsReachableFromObject: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, object: jobject, object_reference_callback: *mut c_void, user_data: *const c_void) -> jvmtiError,
    >,
    /* 110 : Iterate Over Reachable Objects */
    pub IterateOverReachableObjects: Option<
        unsafe extern "system" fn(
            env: *mut jvmtiEnv,
            heap_root_callback: *mut c_void,
            stack_ref_callback: *mut c_void,
            object_ref_callback: *mut c_void,
            user_data: *const c_void,
        ) -> jvmtiError,
    >,
    /* 111 : Iterate Over Heap */
    pub IterateOverHeap: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, object_filter: jint, heap_object_callback: *mut c_void, user_data: *const c_void) -> jvmtiError,
    >,
    /* 112 : Iterate Over Instances Of Class */
    pub IterateOverInstancesOfClass: Option<
        unsafe extern "system" fn(
            env: *mut jvmtiEnv,
            klass: jclass,
            object_filter: jint,
            heap_object_callback: *mut c_void,
            user_data: *const c_void,
        ) -> jvmtiError,
    >,
    /* 113 : RESERVED */
    pub reserved113: *mut c_void,
    /* 114 : Get Objects With Tags */
    pub GetObjectsWithTags: Option<
        unsafe extern "system" fn(
            env: *mut jvmtiEnv,
            tag_count: jint,
            tags: *const jlong,
            count_ptr: *mut jint,
            object_result_ptr: *mut *mut jobject,
            tag_result_ptr: *mut *mut jlong,
        ) -> jvmtiError,
    >,
    /* 115 : Follow References */
    pub FollowReferences: Option<
        unsafe extern "system" fn(
            env: *mut jvmtiEnv,
            heap_filter: jint,
            klass: jclass,
            initial_object: jobject,
            callbacks: *const c_void,
            user_data: *const c_void,
        ) -> jvmtiError,
    >,
    /* 116 : Iterate Through Heap */
    pub IterateThroughHeap: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, heap_filter: jint, klass: jclass, callbacks: *const c_void, user_data: *const c_void) -> jvmtiError,
    >,
    /* 117 : RESERVED */
    pub reserved117: *mut c_void,
    /* 118 : Suspend All Virtual Threads */
    pub SuspendAllVirtualThreads: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, except_count: jint, except_list: *const jthread) -> jvmtiError,
    >,
    /* 119 : Resume All Virtual Threads */
    pub ResumeAllVirtualThreads: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, except_count: jint, except_list: *const jthread) -> jvmtiError,
    >,
    /* 120 : Set JNI Function Table */
    pub SetJNIFunctionTable: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, function_table: *const c_void) -> jvmtiError>,
    /* 121 : Get JNI Function Table */
    pub GetJNIFunctionTable: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, function_table: *mut *mut c_void) -> jvmtiError>,
    /* 122 : Set Event Callbacks */
    pub SetEventCallbacks: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, callbacks: *const jvmtiEventCallbacks, size_of_callbacks: jint) -> jvmtiError,
    >,
    /* 123 : Generate Events */
    pub GenerateEvents: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, event_type: jvmtiEvent) -> jvmtiError>,
    /* 124 : Get Extension Functions */
    pub GetExtensionFunctions: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, extension_count_ptr: *mut jint, extensions: *mut *mut c_void) -> jvmtiError,
    >,
    /* 125 : Get Extension Events */
    pub GetExtensionEvents: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, extension_count_ptr: *mut jint, extensions: *mut *mut c_void) -> jvmtiError,
    >,
    /* 126 : Set Extension Event Callback */
    pub SetExtensionEventCallback: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, extension_event_index: jint, callback: *mut c_void) -> jvmtiError,
    >,
    /* 127 : Dispose Environment */
    pub DisposeEnvironment: Option<unsafe extern "system" fn(env: *mut jvmtiEnv) -> jvmtiError>,
    /* 128 : Get Error Name */
    pub GetErrorName: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, error: jvmtiError, name_ptr: *mut *mut c_char) -> jvmtiError,
    >,
    /* 129 : Get JLocation Format */
    pub GetJLocationFormat: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, format_ptr: *mut jint) -> jvmtiError>,
    /* 130 : Get System Properties */
    pub GetSystemProperties: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, count_ptr: *mut jint, property_ptr: *mut *mut *mut c_char) -> jvmtiError,
    >,
    /* 131 : Get System Property */
    pub GetSystemProperty: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, property: *const c_char, value_ptr: *mut *mut c_char) -> jvmtiError,
    >,
    /* 132 : Set System Property */
    pub SetSystemProperty: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, property: *const c_char, value_ptr: *const c_char) -> jvmtiError,
    >,
    /* 133 : Get Phase */
    pub GetPhase: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, phase_ptr: *mut jint) -> jvmtiError>,
    /* 134 : Get Current Thread CPU Timer Information */
    pub GetCurrentThreadCpuTimerInfo: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, info_ptr: *mut c_void) -> jvmtiError>,
    /* 135 : Get Current Thread CPU Time */
    pub GetCurrentThreadCpuTime: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, nanos_ptr: *mut jlong) -> jvmtiError>,
    /* 136 : Get Thread CPU Timer Information */
    pub GetThreadCpuTimerInfo: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, info_ptr: *mut c_void) -> jvmtiError>,
    /* 137 : Get Thread CPU Time */
    pub GetThreadCpuTime: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, nanos_ptr: *mut jlong) -> jvmtiError,
    >,
    /* 138 : Get Timer Information */
    pub GetTimerInfo: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, info_ptr: *mut c_void) -> jvmtiError>,
    /* 139 : Get Time */
    pub GetTime: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, nanos_ptr: *mut jlong) -> jvmtiError>,
    /* 140 : Get Potential Capabilities */
    pub GetPotentialCapabilities: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, capabilities_ptr: *mut jvmtiCapabilities) -> jvmtiError,
    >,
    /* 141 : RESERVED */
    pub reserved141: *mut c_void,
    /* 142 : Add Capabilities */
    pub AddCapabilities: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, capabilities_ptr: *const jvmtiCapabilities) -> jvmtiError,
    >,
    /* 143 : Relinquish Capabilities */
    pub RelinquishCapabilities: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, capabilities_ptr: *const jvmtiCapabilities) -> jvmtiError,
    >,
    /* 144 : Get Available Processors */
    pub GetAvailableProcessors: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, processor_count_ptr: *mut jint) -> jvmtiError>,
    /* 145 : Get Class Version Numbers */
    pub GetClassVersionNumbers: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, klass: jclass, minor_version_ptr: *mut jint, major_version_ptr: *mut jint) -> jvmtiError,
    >,
    /* 146 : Get Constant Pool */
    pub GetConstantPool: Option<
        unsafe extern "system" fn(
            env: *mut jvmtiEnv,
            klass: jclass,
            constant_pool_count_ptr: *mut jint,
            constant_pool_byte_count_ptr: *mut jint,
            constant_pool_bytes_ptr: *mut *mut c_uchar,
        ) -> jvmtiError,
    >,
    /* 147 : Get Environment Local Storage */
    pub GetEnvironmentLocalStorage: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, data_ptr: *mut *mut c_void) -> jvmtiError>,
    /* 148 : Set Environment Local Storage */
    pub SetEnvironmentLocalStorage: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, data: *const c_void) -> jvmtiError>,
    /* 149 : Add To Bootstrap Class Loader Search */
    pub AddToBootstrapClassLoaderSearch: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, segment: *const c_char) -> jvmtiError>,
    /* 150 : Set Verbose Flag */
    pub SetVerboseFlag: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, flag: jint, value: jboolean) -> jvmtiError>,
    /* 151 : Add To System Class Loader Search */
    pub AddToSystemClassLoaderSearch: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, segment: *const c_char) -> jvmtiError>,
    /* 152 : Retransform Classes */
    pub RetransformClasses: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, class_count: jint, classes: *const jclass) -> jvmtiError,
    >,
    /* 153 : Get Owned Monitor Stack Depth Info */
    pub GetOwnedMonitorStackDepthInfo: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, monitor_info_count_ptr: *mut jint, monitor_info_ptr: *mut *mut c_void) -> jvmtiError,
    >,
    /* 154 : Get Object Size */
    pub GetObjectSize: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, object: jobject, size_ptr: *mut jlong) -> jvmtiError>,
    /* 155 : Get Local Instance */
    pub GetLocalInstance: Option<
        unsafe extern "system" fn(env: *mut jvmtiEnv, thread: jthread, depth: jint, value_ptr: *mut jobject) -> jvmtiError,
    >,
    /* 156 : Set Heap Sampling Interval */
    pub SetHeapSamplingInterval: Option<unsafe extern "system" fn(env: *mut jvmtiEnv, sampling_interval: jint) -> jvmtiError>,
}

/// Number of slots (reserved ones included) in [`jvmtiInterface_1_`].
pub const JVMTI_INTERFACE_SLOTS: usize = 156;

/// A JVMTI environment: a pointer to the function table.
///
/// The VM hands out `*mut jvmtiEnv`; dispatch reads `(*env).functions` and
/// calls through the table.
#[repr(C)]
pub struct jvmtiEnv {
    pub functions: *const jvmtiInterface_1_,
}
