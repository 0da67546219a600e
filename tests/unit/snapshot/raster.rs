use super::*;

const RED_SQUARE: &str = concat!(
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4">"#,
    r##"<rect width="4" height="4" fill="#ff0000"/></svg>"##,
);

#[test]
fn svg_data_uri_round_trips_markup() {
    let uri = encode_svg_data_uri("<svg>é</svg>");
    assert!(uri.starts_with(SVG_DATA_URI_PREFIX));
    assert_eq!(decode_svg_data_uri(&uri).unwrap(), "<svg>é</svg>".as_bytes());
}

#[test]
fn svg_data_uri_rejects_foreign_or_plain_payloads() {
    assert!(matches!(
        decode_svg_data_uri("data:image/png;base64,AAAA"),
        Err(FukuwaraiError::Decode(_))
    ));
    assert!(matches!(
        decode_svg_data_uri("data:image/svg+xml,<svg/>"),
        Err(FukuwaraiError::Decode(_))
    ));
    assert!(matches!(
        decode_svg_data_uri("data:image/svg+xml;base64,!!!"),
        Err(FukuwaraiError::Decode(_))
    ));
}

#[test]
fn parse_svg_ok_and_err() {
    parse_svg(RED_SQUARE.as_bytes()).unwrap();
    assert!(matches!(parse_svg(b"<svg"), Err(FukuwaraiError::Decode(_))));
}

#[test]
fn rasterize_data_uri_produces_png_with_fill_color() {
    let canvas = Canvas::new(4, 4).unwrap();
    let snap = rasterize_data_uri(&encode_svg_data_uri(RED_SQUARE), canvas).unwrap();
    assert_eq!((snap.width, snap.height), (4, 4));
    assert!(snap.png.starts_with(&[0x89, b'P', b'N', b'G']));
    assert!(snap.to_data_uri().starts_with("data:image/png;base64,"));

    let img = snap.decode_rgba8().unwrap();
    assert_eq!(img.dimensions(), (4, 4));
    assert_eq!(img.get_pixel(1, 2).0, [255, 0, 0, 255]);
}

#[test]
fn rasterize_scales_to_requested_canvas() {
    let canvas = Canvas::new(8, 8).unwrap();
    let snap = rasterize_data_uri(&encode_svg_data_uri(RED_SQUARE), canvas).unwrap();
    let img = snap.decode_rgba8().unwrap();
    assert_eq!(img.dimensions(), (8, 8));
    assert_eq!(img.get_pixel(7, 7).0, [255, 0, 0, 255]);
}

#[test]
fn demultiply_restores_straight_alpha() {
    let mut px = vec![64u8, 0, 128, 128, 10, 20, 30, 255, 5, 5, 5, 0];
    demultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[128, 0, 255, 128]);
    assert_eq!(&px[4..8], &[10, 20, 30, 255]);
    assert_eq!(&px[8..12], &[5, 5, 5, 0]);
}

#[test]
fn oversized_raster_is_a_decode_error() {
    let tree = parse_svg(RED_SQUARE.as_bytes()).unwrap();
    let huge = Canvas {
        width: 100_000,
        height: 100_000,
    };
    assert!(matches!(
        rasterize_svg_to_premul_rgba8(&tree, huge),
        Err(FukuwaraiError::Decode(_))
    ));
}
