/// Build script for WalkScene
///
/// The WGSL shader is embedded with `include_str!`, so a change to it must
/// trigger a rebuild.
fn main() {
    println!("cargo:rerun-if-changed=src/renderer/shaders/shader.wgsl");
}
