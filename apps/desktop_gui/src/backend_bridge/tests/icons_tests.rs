use super::*;
use axum::{routing::get, Router};
use std::io::Cursor;
use tokio::net::TcpListener;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 40, 255]));
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .expect("encode png");
    buf
}

#[test]
fn relative_paths_resolve_under_asset_root() {
    let root = Path::new("/srv/openbongo");
    assert_eq!(
        resolve_icon_source("cats/tabby.png", root).expect("resolve"),
        IconLocation::File(PathBuf::from("/srv/openbongo/cats/tabby.png"))
    );
}

#[test]
fn urls_and_absolute_paths_are_kept() {
    let root = Path::new("/srv/openbongo");
    assert!(matches!(
        resolve_icon_source("https://cdn.example.com/hat.png", root).expect("resolve"),
        IconLocation::Remote(_)
    ));
    #[cfg(unix)]
    {
        assert_eq!(
            resolve_icon_source("/tmp/hat.png", root).expect("resolve"),
            IconLocation::File(PathBuf::from("/tmp/hat.png"))
        );
        assert_eq!(
            resolve_icon_source("file:///tmp/hat.png", root).expect("resolve"),
            IconLocation::File(PathBuf::from("/tmp/hat.png"))
        );
    }
}

#[test]
fn empty_icon_path_is_an_error() {
    assert!(resolve_icon_source("  ", Path::new(".")).is_err());
}

#[test]
fn large_icons_are_scaled_down_keeping_aspect() {
    let icon = decode_icon("wide.png", &png_bytes(192, 96)).expect("decode");
    assert_eq!((icon.width, icon.height), (96, 48));
    assert_eq!(icon.rgba.len(), 96 * 48 * 4);
    assert_eq!(icon.source, "wide.png");
}

#[test]
fn small_icons_keep_their_size() {
    let icon = decode_icon("small.png", &png_bytes(16, 24)).expect("decode");
    assert_eq!((icon.width, icon.height), (16, 24));
}

#[test]
fn garbage_bytes_do_not_decode() {
    assert!(decode_icon("broken.png", b"not an image").is_err());
}

#[tokio::test]
async fn loads_icons_from_asset_root() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir_all(dir.path().join("hats")).expect("mkdir");
    std::fs::write(dir.path().join("hats/beanie.png"), png_bytes(32, 32)).expect("write");

    let http = reqwest::Client::new();
    let icon = load_icon(&http, dir.path(), "hats/beanie.png")
        .await
        .expect("icon");
    assert_eq!((icon.width, icon.height), (32, 32));

    assert!(load_icon(&http, dir.path(), "hats/missing.png")
        .await
        .is_err());
}

#[tokio::test]
async fn loads_icons_over_http() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let body = png_bytes(48, 48);
    let app = Router::new().route("/icons/classic.png", get(move || async move { body }));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let http = reqwest::Client::new();
    let source = format!("http://{addr}/icons/classic.png");
    let icon = load_icon(&http, Path::new("."), &source)
        .await
        .expect("icon");
    assert_eq!((icon.width, icon.height), (48, 48));

    let missing = format!("http://{addr}/icons/none.png");
    assert!(load_icon(&http, Path::new("."), &missing).await.is_err());
}
