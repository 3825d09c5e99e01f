fn main() {
    println!("=== Pullable Demo ===");
    println!("A scripted finger drags the panel down past its threshold:");
    println!("  - the panel and the transleable element follow the finger");
    println!("  - the alpheable element fades as the pull approaches the limit");
    println!("  - on release the panel snaps, then resets after 3 seconds");
    println!();

    pullable_demo::entry_point();
}
