//! Map subcommands.

use crate::Context;
use anyhow::{anyhow, bail};
use climact_map::client::WmsClient;
use climact_map::tiles::MapPresenter;
use climact_map::wms::{FeatureInfoRequest, LatLng, Viewport, DEFAULT_VIEWPORT};
use log::info;

/// Print the tile and legend URLs for the stored selection.
pub fn run_map(context: &Context) -> anyhow::Result<()> {
    let store = context.store();
    let client = WmsClient::new(&context.services());

    let mut presenter = MapPresenter::new();
    presenter.sync(store.state());
    let get_map = presenter
        .get_map_params()
        .ok_or_else(|| anyhow!("no map layer for the current selection"))?;
    let legend = presenter
        .legend_params()
        .ok_or_else(|| anyhow!("no legend for the current selection"))?;

    println!("Layer:  {}", get_map.layer);
    println!("Tiles:  {}", client.get_map_url(get_map)?);
    println!("Legend: {}", client.legend_url(legend)?);
    Ok(())
}

/// Look up the value at `lat`/`lng` and print the popup a double click
/// would show.
pub async fn run_feature(
    context: &Context,
    lat: f64,
    lng: f64,
    bbox: Option<&str>,
    size: Option<&str>,
) -> anyhow::Result<()> {
    let viewport = parse_viewport(bbox, size)?;
    let point = LatLng { lat, lng };
    if !viewport.contains(point) {
        bail!("{:.4},{:.4} is outside the viewport {}", lat, lng, viewport.bbox());
    }

    let store = context.store();
    let selection = store.state();
    let client = WmsClient::new(&context.services());
    let request = FeatureInfoRequest::new(selection, viewport, point);
    let value = client.lookup(&request, &selection.variable.domain).await;
    info!("{} at {:?}: {}", request.layer, point, value);

    let mut presenter = MapPresenter::new();
    presenter.sync(selection);
    presenter.on_click(point, value.clone());
    match presenter.on_double_click(point, selection.variable.domain()) {
        Some(popup) => {
            for line in popup.lines() {
                println!("{}", line);
            }
        }
        None => println!("{}", value),
    }
    Ok(())
}

/// Viewport from `south,west,north,east` and `WIDTHxHEIGHT`, each falling
/// back to the initial map view.
pub fn parse_viewport(bbox: Option<&str>, size: Option<&str>) -> anyhow::Result<Viewport> {
    let mut viewport = DEFAULT_VIEWPORT;
    if let Some(bbox) = bbox {
        let edges = bbox
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow!("invalid bbox {}: {}", bbox, e))?;
        let &[south, west, north, east] = edges.as_slice() else {
            bail!("bbox needs four values, got {}", edges.len());
        };
        if south >= north || west >= east {
            bail!("bbox {} is empty", bbox);
        }
        viewport = Viewport {
            south,
            west,
            north,
            east,
            ..viewport
        };
    }
    if let Some(size) = size {
        let (width, height) = size
            .split_once(['x', 'X'])
            .ok_or_else(|| anyhow!("size must look like 800x600, got {}", size))?;
        viewport.width = width.trim().parse()?;
        viewport.height = height.trim().parse()?;
        if viewport.width == 0 || viewport.height == 0 {
            bail!("size {} has no pixels", size);
        }
    }
    Ok(viewport)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_initial_view() {
        assert_eq!(parse_viewport(None, None).unwrap(), DEFAULT_VIEWPORT);
    }

    #[test]
    fn bbox_and_size_override() {
        let viewport = parse_viewport(Some("38,-10, 42,-6"), Some("400x300")).unwrap();
        assert_eq!(viewport.south, 38.0);
        assert_eq!(viewport.west, -10.0);
        assert_eq!(viewport.north, 42.0);
        assert_eq!(viewport.east, -6.0);
        assert_eq!((viewport.width, viewport.height), (400, 300));
    }

    #[test]
    fn malformed_viewports_are_rejected() {
        assert!(parse_viewport(Some("38,-10,42"), None).is_err());
        assert!(parse_viewport(Some("42,-10,38,-6"), None).is_err());
        assert!(parse_viewport(Some("a,b,c,d"), None).is_err());
        assert!(parse_viewport(None, Some("400")).is_err());
        assert!(parse_viewport(None, Some("0x300")).is_err());
    }
}
