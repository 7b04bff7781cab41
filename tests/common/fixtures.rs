//! Fixture helpers - seed an inventory through the CLI, the same way an
//! operator would.

use super::env::TestEnv;

/// Extract the trailing id from a "... with id <id>" confirmation line
pub fn extract_id(stdout: &str) -> String {
    stdout
        .trim()
        .rsplit(' ')
        .next()
        .expect("confirmation line ends with an id")
        .to_string()
}

/// Add a reagent and return its id
pub fn add_reagent(env: &TestEnv, name: &str, concentration: &str, unit: &str) -> String {
    let result = env.run_ok(&[
        "reagent",
        "add",
        "--name",
        name,
        "--concentration",
        concentration,
        "--unit",
        unit,
    ]);
    extract_id(&result.stdout)
}

/// Seed the standard two-reagent inventory: Buffer 10 X and Primer 20 X
pub fn seed_inventory(env: &TestEnv) -> (String, String) {
    let buffer = add_reagent(env, "Buffer", "10", "X");
    let primer = add_reagent(env, "Primer", "20", "X");
    (buffer, primer)
}

/// Create a protocol from `name:target` component specs and return its id
pub fn add_protocol(env: &TestEnv, name: &str, components: &[&str]) -> String {
    let mut args = vec!["protocol", "add", "--name", name];
    for spec in components.iter().copied() {
        args.push("--component");
        args.push(spec);
    }
    let result = env.run_ok(&args);
    extract_id(&result.stdout)
}
