//! Basic example of the SiDI container.

use sidi::prelude::*;
use std::sync::{Arc, Mutex};

// === Define your types ===

struct Config {
    database_url: String,
    debug: bool,
}

/// Collects log lines so they can be shared through the container.
#[derive(Default)]
struct MemoryLog {
    lines: Mutex<Vec<String>>,
}

impl MemoryLog {
    fn log(&self, msg: &str) {
        println!("[LOG] {msg}");
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(msg.to_string());
        }
    }
}

struct Widget {
    color: String,
    size: u32,
}

impl Widget {
    fn describe(&self) -> String {
        format!("{} widget, size {}", self.color, self.size)
    }
}

impl Construct for Widget {
    fn construct(args: &mut Args) -> Result<Self> {
        let size: u32 = args.take(1)?;
        if size == 0 {
            return Err(SidiError::construction("widget size must be positive"));
        }
        Ok(Widget {
            color: args.take::<&str>(0)?.to_string(),
            size,
        })
    }
}

struct Connection {
    url: String,
}

fn main() -> Result<()> {
    // Initialize tracing (logging)
    tracing_subscriber::fmt()
        .with_env_filter("sidi_container=debug")
        .init();

    let log = Arc::new(MemoryLog::default());

    let mut container = Container::new();
    container
        .set(
            "config",
            Config {
                database_url: "postgres://localhost/myapp".to_string(),
                debug: true,
            },
        )
        .set_shared("log", log.clone())
        // An optional override that was not given: nothing changes.
        .set_if_present("config", None::<Config>)
        .register_type::<Widget>("widget")
        .set_factory("connection", |args: Args| {
            Ok(Connection {
                url: args.arg::<String>(0)?.clone(),
            })
        });

    println!("✅ Container ready: {container:?}");

    // === Values ===
    if let Some(config) = container.get::<Config>("config") {
        println!("📋 Config: database_url={}, debug={}", config.database_url, config.debug);

        let conn: Option<Connection> =
            container.create_as("connection", args![config.database_url.clone()])?;
        if let Some(conn) = conn {
            println!("🔌 Connected to {}", conn.url);
        }
    }

    // The log we get back is the very one we stored.
    if let Some(shared_log) = container.get::<MemoryLog>("log") {
        shared_log.log("hello from the container");
    }

    // === Factories ===
    let widget: Option<Widget> = container.create_as("widget", args!["red", 5u32])?;
    if let Some(widget) = widget {
        log.log(&widget.describe());
    }

    match container.create("widget", args!["blue", 0u32]) {
        Ok(_) => println!("unexpected widget"),
        Err(err) => println!("⚠️  {err}"),
    }

    let missing = container.create("gadget", args![])?;
    println!("❓ gadget registered: {}", missing.is_some());

    container.clear_factory("widget").clear("config");
    println!("🧹 After clearing: {container:?}");

    println!("\n🎉 Logged {} lines", log.lines.lock().map(|l| l.len()).unwrap_or(0));
    Ok(())
}
