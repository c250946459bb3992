use std::io;

use export_tidy::names;

pub fn run(inputs: &[String], json: bool) -> io::Result<()> {
    if json {
        let pairs: Vec<serde_json::Value> = inputs
            .iter()
            .map(|name| serde_json::json!({ "original": name, "cleaned": names::clean(name) }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&pairs)?);
        return Ok(());
    }

    for name in inputs {
        println!("{}", names::clean(name));
    }
    Ok(())
}
