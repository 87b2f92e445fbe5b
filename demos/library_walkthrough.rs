//! Scripted circulation walkthrough
//!
//! Registers three books and two patrons, then checks, borrows, re-checks and
//! returns a book, narrating every step to stdout before printing the final
//! patron summaries.
//!
//! Pass `--english` for English labels and `--json` for JSON-lines events.

use circulation::{
    CatalogEntry, JsonLinesSink, Labels, LibraryRegistry, NarrationSink, Patron, RegistryConfig,
};

const PYTHON_CRASH_COURSE: &str = "9787115428028";

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let labels = if args.iter().any(|a| a == "--english") {
        Labels::english()
    } else {
        Labels::chinese()
    };

    let mut registry = LibraryRegistry::with_config(RegistryConfig::new().with_labels(labels));
    if args.iter().any(|a| a == "--json") {
        registry.subscribe(JsonLinesSink::new(std::io::stdout()));
    } else {
        registry.subscribe(NarrationSink::new(std::io::stdout()));
    }

    registry.register_entry(CatalogEntry::new(
        "Python编程：从入门到实践",
        "埃里克·马瑟斯",
        PYTHON_CRASH_COURSE,
    ))?;
    registry.register_entry(CatalogEntry::new(
        "数据结构与算法分析",
        "马克·艾伦·维斯",
        "9787115546926",
    ))?;
    registry.register_entry(CatalogEntry::new(
        "深入理解计算机系统",
        "兰德尔·E·布莱恩特",
        "9787111641247",
    ))?;

    registry.register_patron(Patron::new("张三", "C001"))?;
    registry.register_patron(Patron::new("李四", "C002"))?;

    println!("\n----- check availability -----");
    let _ = registry.check_availability(PYTHON_CRASH_COURSE);

    println!("\n----- C001 borrows -----");
    registry.borrow("C001", PYTHON_CRASH_COURSE)?;

    println!("\n----- check availability again -----");
    let _ = registry.check_availability(PYTHON_CRASH_COURSE);

    println!("\n----- C001 returns -----");
    registry.give_back("C001", PYTHON_CRASH_COURSE)?;

    println!("\n----- patrons -----");
    for line in registry.patron_summaries() {
        println!("{line}");
    }

    registry.audit()?;
    Ok(())
}
