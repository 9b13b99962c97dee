use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::DispatchError;
use crate::model::Coordinates;
use crate::routing::optimize::OptimizedRoute;

const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";

/// Render an optimized route as a GPX 1.1 document.
///
/// One waypoint per located stop, in visiting order, and one track through
/// `RouteInfo::coordinates` (the stops themselves when no route was
/// fetched). The encoded polyline is not decoded.
pub fn route_to_gpx(route: &OptimizedRoute, name: &str) -> Result<String, DispatchError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    let gpx = BytesStart::new("gpx").with_attributes([
        ("version", "1.1"),
        ("creator", "dispatch"),
        ("xmlns", GPX_NAMESPACE),
    ]);
    write(&mut writer, Event::Start(gpx))?;

    for (index, stop) in route.stops.iter().enumerate() {
        let Some(point) = stop.coordinates else {
            continue;
        };
        write(&mut writer, Event::Start(point_start("wpt", point)))?;
        text_element(
            &mut writer,
            "name",
            &format!("{}. {}", index + 1, stop.job.address),
        )?;
        let desc = match stop.job.slot_label() {
            Some(slot) => format!("{} ({slot})", stop.job.city),
            None => stop.job.city.clone(),
        };
        text_element(&mut writer, "desc", &desc)?;
        write(&mut writer, Event::End(BytesEnd::new("wpt")))?;
    }

    let track = match &route.route {
        Some(info) if !info.coordinates.is_empty() => info.coordinates.clone(),
        _ => route.located_points(),
    };
    if !track.is_empty() {
        write(&mut writer, Event::Start(BytesStart::new("trk")))?;
        text_element(&mut writer, "name", name)?;
        write(&mut writer, Event::Start(BytesStart::new("trkseg")))?;
        for point in track {
            write(&mut writer, Event::Empty(point_start("trkpt", point)))?;
        }
        write(&mut writer, Event::End(BytesEnd::new("trkseg")))?;
        write(&mut writer, Event::End(BytesEnd::new("trk")))?;
    }

    write(&mut writer, Event::End(BytesEnd::new("gpx")))?;

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| DispatchError::Gpx(e.to_string()))
}

fn point_start(tag: &str, point: Coordinates) -> BytesStart<'_> {
    let lat = format!("{:.6}", point.lat);
    let lon = format!("{:.6}", point.lng);
    BytesStart::new(tag).with_attributes([("lat", lat.as_str()), ("lon", lon.as_str())])
}

fn text_element(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    tag: &str,
    text: &str,
) -> Result<(), DispatchError> {
    write(writer, Event::Start(BytesStart::new(tag)))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(tag)))
}

fn write(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<(), DispatchError> {
    writer
        .write_event(event)
        .map_err(|e| DispatchError::Gpx(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Job, JobId, JobTags, RouteInfo};
    use crate::routing::optimize::RouteStop;

    fn stop(n: usize, address: &str, coordinates: Option<Coordinates>) -> RouteStop {
        RouteStop {
            job: Job {
                id: JobId::from_line(n, address),
                address: address.into(),
                original_address: None,
                city: "MESA".into(),
                zip_code: None,
                notes: String::new(),
                tags: JobTags::default(),
                original_timeframe: Some("1pm-3pm".into()),
                time_slot_label: None,
                assigned_rep: None,
            },
            coordinates,
        }
    }

    fn route() -> OptimizedRoute {
        OptimizedRoute {
            stops: vec![
                stop(1, "10 A St", Some(Coordinates::new(33.4, -111.8))),
                stop(2, "20 B & C Rd", Some(Coordinates::new(33.5, -111.9))),
                stop(3, "30 Lost Ln", None),
            ],
            route: None,
            failed_addresses: vec!["30 Lost Ln, MESA".into()],
            straight_line_miles: 0.0,
            notices: vec![],
        }
    }

    #[test]
    fn test_waypoints_in_visiting_order() {
        let gpx = route_to_gpx(&route(), "Dana").unwrap();
        assert!(gpx.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert_eq!(gpx.matches("<wpt ").count(), 2);
        let first = gpx.find("1. 10 A St").unwrap();
        let second = gpx.find("2. 20 B &amp; C Rd").unwrap();
        assert!(first < second);
        assert!(gpx.contains("<desc>MESA (1pm-3pm)</desc>"));
    }

    #[test]
    fn test_track_falls_back_to_stops() {
        let gpx = route_to_gpx(&route(), "Dana").unwrap();
        assert_eq!(gpx.matches("<trkpt ").count(), 2);
        assert!(gpx.contains(r#"lat="33.400000" lon="-111.800000""#));
    }

    #[test]
    fn test_track_uses_route_geometry() {
        let mut r = route();
        r.route = Some(RouteInfo {
            distance: 9.0,
            duration: 20.0,
            geometry: None,
            coordinates: vec![
                Coordinates::new(33.4, -111.8),
                Coordinates::new(33.45, -111.85),
                Coordinates::new(33.5, -111.9),
            ],
        });
        let gpx = route_to_gpx(&r, "Dana").unwrap();
        assert_eq!(gpx.matches("<trkpt ").count(), 3);
    }

    #[test]
    fn test_no_located_stops_has_no_track() {
        let mut r = route();
        r.stops.clear();
        let gpx = route_to_gpx(&r, "Dana").unwrap();
        assert!(!gpx.contains("<trk>"));
        assert!(gpx.trim_end().ends_with("</gpx>"));
    }
}
