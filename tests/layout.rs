use std::mem::{offset_of, size_of};
use std::os::raw::c_void;

use jvmti_agent::sys::{cmlr, jvmti};
use static_assertions::const_assert_eq;

const PTR: usize = size_of::<*const c_void>();

const_assert_eq!(size_of::<jvmti::jvmtiCapabilities>(), 16);
const_assert_eq!(size_of::<jvmti::jvmtiError>(), size_of::<u32>());
const_assert_eq!(size_of::<jvmti::jvmtiEnv>(), PTR);
const_assert_eq!(size_of::<jvmti::jvmtiEventVMInit>(), PTR);
const_assert_eq!(
    size_of::<jvmti::jvmtiEventCallbacks>(),
    jvmti::JVMTI_EVENT_CALLBACK_SLOTS * PTR
);
const_assert_eq!(
    size_of::<jvmti::jvmtiInterface_1_>(),
    jvmti::JVMTI_INTERFACE_SLOTS * PTR
);

#[test]
fn function_table_slots_sit_at_their_numbered_positions() {
    // Offset of slot N is (N - 1) pointers.
    assert_eq!(offset_of!(jvmti::jvmtiInterface_1_, SetEventNotificationMode), PTR);
    assert_eq!(offset_of!(jvmti::jvmtiInterface_1_, Deallocate), 46 * PTR);
    assert_eq!(offset_of!(jvmti::jvmtiInterface_1_, GetClassSignature), 47 * PTR);
    assert_eq!(offset_of!(jvmti::jvmtiInterface_1_, GetSourceFileName), 49 * PTR);
    assert_eq!(offset_of!(jvmti::jvmtiInterface_1_, GetMethodName), 63 * PTR);
    assert_eq!(offset_of!(jvmti::jvmtiInterface_1_, GetLineNumberTable), 69 * PTR);
    assert_eq!(offset_of!(jvmti::jvmtiInterface_1_, IsMethodNative), 75 * PTR);
    assert_eq!(offset_of!(jvmti::jvmtiInterface_1_, GetVersionNumber), 87 * PTR);
    assert_eq!(offset_of!(jvmti::jvmtiInterface_1_, SetEventCallbacks), 121 * PTR);
    assert_eq!(offset_of!(jvmti::jvmtiInterface_1_, DisposeEnvironment), 126 * PTR);
    assert_eq!(offset_of!(jvmti::jvmtiInterface_1_, GetPotentialCapabilities), 139 * PTR);
    assert_eq!(offset_of!(jvmti::jvmtiInterface_1_, AddCapabilities), 141 * PTR);
    assert_eq!(offset_of!(jvmti::jvmtiInterface_1_, RelinquishCapabilities), 142 * PTR);
    assert_eq!(offset_of!(jvmti::jvmtiInterface_1_, SetHeapSamplingInterval), 155 * PTR);
}

#[test]
fn callback_slots_follow_the_event_numbering() {
    // Offset of event E is (E - 50) pointers, reserved positions included.
    assert_eq!(offset_of!(jvmti::jvmtiEventCallbacks, VMInit), 0);
    assert_eq!(offset_of!(jvmti::jvmtiEventCallbacks, ClassFileLoadHook), 4 * PTR);
    assert_eq!(offset_of!(jvmti::jvmtiEventCallbacks, CompiledMethodLoad), 18 * PTR);
    assert_eq!(offset_of!(jvmti::jvmtiEventCallbacks, DataDumpRequest), 21 * PTR);
    assert_eq!(offset_of!(jvmti::jvmtiEventCallbacks, MonitorWait), 23 * PTR);
    assert_eq!(offset_of!(jvmti::jvmtiEventCallbacks, ResourceExhausted), 30 * PTR);
    assert_eq!(offset_of!(jvmti::jvmtiEventCallbacks, VMObjectAlloc), 34 * PTR);
    assert_eq!(offset_of!(jvmti::jvmtiEventCallbacks, SampledObjectAlloc), 36 * PTR);
}

#[test]
fn default_callback_table_is_all_null() {
    let table = jvmti::jvmtiEventCallbacks::default();
    let slots: [usize; jvmti::JVMTI_EVENT_CALLBACK_SLOTS] = unsafe { std::mem::transmute(table) };
    assert!(slots.iter().all(|slot| *slot == 0));
}

#[test]
fn capability_bits_land_in_the_right_words() {
    let mut caps = jvmti::jvmtiCapabilities::default();
    assert!(caps.is_empty());
    caps.set_can_tag_objects(true);
    caps.set_can_generate_compiled_method_load_events(true);
    caps.set_can_generate_sampled_object_alloc_events(true);
    caps.set_can_support_virtual_threads(true);
    let words: [u32; 4] = unsafe { std::mem::transmute(caps) };
    assert_eq!(words[0], 1 | (1 << 27));
    assert_eq!(words[1], (1 << 11) | (1 << 12));
    assert_eq!(words[2], 0);
    assert_eq!(words[3], 0);
}

#[test]
fn capability_accessors_round_trip() {
    let mut caps = jvmti::jvmtiCapabilities::default();
    caps.set_can_get_line_numbers(true);
    caps.set_can_generate_garbage_collection_events(true);
    assert!(caps.can_get_line_numbers());
    assert!(caps.can_generate_garbage_collection_events());
    assert!(!caps.can_tag_objects());
    assert!(!caps.is_empty());
    caps.set_can_get_line_numbers(false);
    caps.set_can_generate_garbage_collection_events(false);
    assert!(caps.is_empty());
}

#[test]
fn capabilities_display_names_the_set_flags() {
    let mut caps = jvmti::jvmtiCapabilities::default();
    assert_eq!(caps.to_string(), "[]");
    caps.set_can_tag_objects(true);
    caps.set_can_generate_compiled_method_load_events(true);
    assert_eq!(
        caps.to_string(),
        "[can_tag_objects can_generate_compiled_method_load_events]"
    );
}

#[cfg(target_pointer_width = "64")]
#[test]
fn record_structs_match_the_c_layout() {
    assert_eq!(size_of::<jvmti::jvmtiAddrLocationMap>(), 16);
    assert_eq!(size_of::<jvmti::jvmtiLineNumberEntry>(), 16);
    assert_eq!(size_of::<cmlr::jvmtiCompiledMethodLoadRecordHeader>(), 24);
    assert_eq!(offset_of!(cmlr::jvmtiCompiledMethodLoadRecordHeader, next), 16);
    assert_eq!(size_of::<cmlr::PCStackInfo>(), 32);
    assert_eq!(size_of::<cmlr::jvmtiCompiledMethodLoadInlineRecord>(), 40);
    assert_eq!(offset_of!(cmlr::jvmtiCompiledMethodLoadInlineRecord, pcinfo), 32);
    assert_eq!(size_of::<cmlr::jvmtiCompiledMethodLoadDummyRecord>(), 80);
}
