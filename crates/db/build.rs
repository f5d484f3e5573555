// Rebuild when a script is added to the workspace `migrations/` directory so
// `sqlx::migrate!` picks it up.
fn main() {
    println!("cargo:rerun-if-changed=../../migrations");
}
