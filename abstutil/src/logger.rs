/// Intercept messages using the `log` crate and print them to STDERR. The filter defaults to
/// `info` and can be changed through `RUST_LOG`.
pub fn setup() {
    use env_logger::{Builder, Env};
    // Tests and repeated CLI setup may race to install the logger; only the first one wins.
    let _ = Builder::from_env(Env::default().default_filter_or("info")).try_init();
}
