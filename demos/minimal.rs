//! Minimal agent: logs the load, the JVMTI version and the unload.
//!
//! Build:
//!   cargo build --release --example minimal
//! Run:
//!   RUST_LOG=info java -agentpath:./target/release/examples/libminimal.so=hello MyApp

use jvmti_agent::prelude::*;
use log::{error, info};

#[derive(Default)]
struct MinimalAgent;

impl Agent for MinimalAgent {
    fn on_load(&self, vm: &Jvm, options: Option<&str>) -> jni::jint {
        info!("Loaded with options: {:?}", options);
        match vm.get_jvmti_env(JvmtiVersion::Current) {
            Ok(mut env) => {
                if let Ok(version) = env.get_version_number() {
                    info!("JVMTI version: 0x{:08x}", version);
                }
                jni::JNI_OK
            }
            Err(e) => {
                error!("Failed to obtain a JVMTI environment: {}", e);
                jni::JNI_ERR
            }
        }
    }

    fn on_unload(&self, _vm: &Jvm) {
        info!("Unloading");
    }
}

export_agent!(MinimalAgent);
