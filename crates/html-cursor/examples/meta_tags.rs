//! List the <meta> tags of an HTML document read from stdin
//!
//! cargo run --example meta_tags < page.html

use html_cursor::Cursor;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let mut cursor = Cursor::from_reader(std::io::stdin().lock())?;

    match cursor.head() {
        Ok(head) => {
            let node_id = head.node_id;
            println!("<head> at depth {} (node {})", cursor.depth(), node_id);
        }
        Err(e) if e.is_boundary() => println!("no <head>"),
        Err(e) => return Err(e.into()),
    }

    let mut count = 0;
    let mut found = cursor.first_meta().is_ok();
    while found {
        count += 1;
        let meta = cursor.node();
        let attrs: Vec<String> = meta
            .attributes
            .iter()
            .map(|attr| format!("{}={:?}", &*attr.name.local, attr.value))
            .collect();
        println!("meta #{}: {}", count, attrs.join(" "));
        found = cursor.next_meta().is_ok();
    }

    println!("{} meta tag(s)", count);
    Ok(())
}
