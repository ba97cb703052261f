//! Headless inspection of a map view: loads the configured feature file,
//! prints the visible layers and the popup a click at the given pixel opens.
//!
//! Usage: cadastre-inspect [config.json] [x y]

use cadastre_map::prelude::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config, rest) = match args.first() {
        Some(path) if path.ends_with(".json") => (MapViewConfig::from_path(path)?, &args[1..]),
        _ => (MapViewConfig::default(), &args[..]),
    };

    let size = config.view.size;
    let pixel = match rest {
        [x, y] => Point::new(x.parse()?, y.parse()?),
        _ => Point::new(size.x / 2.0, size.y / 2.0),
    };

    let mut map = MapView::new(config, HeadlessEngine::new());
    if !map.initialize() {
        return Err("map could not be mounted".into());
    }

    match map.wait_for_features(Duration::from_secs(30)) {
        Some(count) => println!("features loaded: {}", count),
        None => println!("features still loading after 30s"),
    }

    if let (Some(registry), Some(view)) = (map.registry(), map.engine().view()) {
        let center = LatLng::from_mercator(view.center);
        let zoom = view.zoom.round().clamp(0.0, f64::from(u8::MAX)) as u8;
        if let Some(url) = registry.base_layer().tile_url_at(&center, zoom) {
            println!("center tile of {}: {}", registry.base_layer().display_name(), url);
        }
    }

    println!("visible layers:");
    for layer in map.list_visible_layers() {
        println!("  {} {}", layer.id, layer.name);
    }

    map.click_at(pixel);
    let popup = map.popup();
    if popup.visible {
        println!("feature at ({}, {}):", pixel.x, pixel.y);
        for entry in &popup.content {
            println!("  {}: {}", entry.key, entry.value);
        }
    } else {
        println!("no feature at ({}, {})", pixel.x, pixel.y);
    }

    Ok(())
}
