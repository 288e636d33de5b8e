//! List site routes

use anyhow::Result;
use std::fs;

use crate::content::FrontMatter;
use crate::Site;

/// Print the route table: route, source file, and title when one is set
pub fn run(site: &Site) -> Result<()> {
    let resolver = site.resolver();
    let routes = resolver.routes()?;

    println!("Routes ({}):", routes.len() + 1);
    print_route("/", &site.config.index_file, site);

    for route in routes {
        let source = resolver.source_path(&route);
        print_route(&format!("/{}", route.join("/")), &source, site);
    }

    Ok(())
}

fn print_route(route: &str, source: &str, site: &Site) {
    match title_of(site, source) {
        Some(title) => println!("  {} - {} [{}]", route, title, source),
        None => println!("  {} [{}]", route, source),
    }
}

/// Read just the front-matter title, without rendering the page
fn title_of(site: &Site, source: &str) -> Option<String> {
    let raw = fs::read_to_string(site.content_dir.join(source)).ok()?;
    let (fm, _) = FrontMatter::parse(&raw).ok()?;
    fm.title().map(str::to_string)
}
