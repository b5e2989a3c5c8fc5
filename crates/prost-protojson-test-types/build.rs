use std::env;
use std::fs;
use std::path::PathBuf;

use prost::Message;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let proto_dir = "proto";
    let files = &["protojson/test/types.proto"];

    for f in files {
        println!("cargo:rerun-if-changed={proto_dir}/{f}");
    }

    #[allow(clippy::unwrap_used)]
    let base_path = PathBuf::from(env::var("OUT_DIR").unwrap());
    let descriptor_path = base_path.join("file_descriptor_set.bin");

    // protox bundles the google.protobuf well-known type sources, so the
    // descriptor set comes out with all transitive imports included.
    let file_descriptor_set = protox::compile(
        files.iter().map(|f| format!("{proto_dir}/{f}")),
        [proto_dir],
    )?;
    fs::write(&descriptor_path, file_descriptor_set.encode_to_vec())?;

    prost_build::Config::new().compile_fds(file_descriptor_set)?;

    Ok(())
}
