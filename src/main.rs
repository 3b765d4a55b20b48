#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = warpfield::window::run(warpfield::FieldConfig::default()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

// The browser entry point is `WarpCanvas::mount`.
#[cfg(target_arch = "wasm32")]
fn main() {}
