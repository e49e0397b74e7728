#[cfg(target_os = "windows")]
fn main() {
    use winresource::WindowsResource;

    println!("cargo:rerun-if-changed=res/rcycletimer.ico");
    if !std::path::Path::new("res/rcycletimer.ico").exists() {
        return;
    }

    let mut res = WindowsResource::new();
    res.set_icon("res/rcycletimer.ico")
        .set("FileDescription", "rCycleTimer CLI")
        .set("ProductName", "rCycleTimer")
        .set("OriginalFilename", "rcycletimer.exe")
        .set("FileVersion", env!("CARGO_PKG_VERSION"))
        .set("ProductVersion", env!("CARGO_PKG_VERSION"))
        .compile()
        .expect("Failed to embed icon resource");
}

#[cfg(not(target_os = "windows"))]
fn main() {}
