//! Logs JIT activity: compiled method loads with their inlining records,
//! compiled method unloads and dynamically generated stubs.
//!
//! Build:
//!   cargo build --release --example jit_log
//! Run:
//!   RUST_LOG=info java -agentpath:./target/release/examples/libjit_log.so MyApp

use std::sync::Mutex;

use jvmti_agent::prelude::*;
use log::{error, info, warn};

#[derive(Default)]
struct JitLog {
    // Keeps the environment alive; disposing it would tear down the
    // installed callbacks.
    env: Mutex<Option<JvmtiEnv>>,
}

impl Agent for JitLog {
    fn on_load(&self, vm: &Jvm, _options: Option<&str>) -> jni::jint {
        let mut env = match vm.get_jvmti_env(JvmtiVersion::Current) {
            Ok(env) => env,
            Err(e) => {
                error!("Failed to obtain a JVMTI environment: {}", e);
                return jni::JNI_ERR;
            }
        };

        let mut capabilities = jvmti::jvmtiCapabilities::default();
        capabilities.set_can_generate_compiled_method_load_events(true);
        if let Err(e) = env.add_capabilities(&capabilities) {
            error!("Failed to add capabilities: {}", e);
            return jni::JNI_ERR;
        }

        let mut settings = EventSettings::new();
        settings
            .enable_compiled_method_load(true)
            .enable_compiled_method_unload(true)
            .enable_dynamic_code_generated(true);
        if let Err(e) = env.set_event_callbacks(&settings.callbacks()) {
            error!("Failed to set event callbacks: {}", e);
            return jni::JNI_ERR;
        }
        for event in settings.enabled_events() {
            if let Err(e) = env.set_event_notification_mode(JvmtiEventMode::Enable, event, None) {
                error!("Failed to enable the {:?} event: {}", event, e);
                return jni::JNI_ERR;
            }
        }
        info!("Listening for {}", settings);

        if let Ok(mut slot) = self.env.lock() {
            *slot = Some(env);
        }
        jni::JNI_OK
    }

    fn compiled_method_load(
        &self,
        env: &mut JvmtiEnv,
        method: JMethodId,
        code_addr: usize,
        code_size: usize,
        address_locations: Option<&[AddressLocationEntry]>,
        compile_infos: Option<&[CompiledMethodLoadRecord]>,
    ) {
        let name = match env.get_method_name(&method) {
            Ok(name) => name,
            Err(e) => {
                warn!("Failed to resolve a compiled method name: {}", e);
                return;
            }
        };
        let class_signature = env
            .get_method_declaring_class(&method)
            .ok()
            .and_then(|class| env.get_class_signature(&class).ok())
            .map(|class| class.signature)
            .unwrap_or_default();
        let inline_records = compile_infos
            .map(|records| {
                records
                    .iter()
                    .filter(|record| matches!(record, CompiledMethodLoadRecord::Inline { .. }))
                    .count()
            })
            .unwrap_or(0);
        info!(
            "Compiled {}{}{} at 0x{:x} ({} bytes, {} location entries, {} inline records)",
            class_signature,
            name.name,
            name.signature,
            code_addr,
            code_size,
            address_locations.map_or(0, |map| map.len()),
            inline_records,
        );
    }

    fn compiled_method_unload(&self, _env: &mut JvmtiEnv, _method: JMethodId, code_addr: usize) {
        info!("Unloaded compiled code at 0x{:x}", code_addr);
    }

    fn dynamic_code_generated(&self, _env: &mut JvmtiEnv, name: &str, address: usize, length: usize) {
        info!("Dynamic code '{}' at 0x{:x} ({} bytes)", name, address, length);
    }
}

export_agent!(JitLog);
