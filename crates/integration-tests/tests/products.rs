//! Integration tests for product creation, listing, export and images.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use startify_integration_tests::{Part, TestClient};
use startify_web::config::StartifyConfig;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-data";

/// Signed-in client for a fresh application.
async fn signed_in(name: &str, email: &str) -> TestClient {
    let mut client = TestClient::new();
    client.signup(name, email, "pw").await;
    client
}

/// Id of the first exported product.
async fn first_product_id(client: &mut TestClient) -> String {
    let csv = client.get("/products/export.csv").await.text();
    let row = csv.lines().nth(1).unwrap();
    row.split(',').next().unwrap().to_owned()
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_product_shows_success() {
    let mut client = signed_in("Ana", "ana%40example.com").await;

    let form = client.get("/products/new").await;
    assert_eq!(form.status, StatusCode::OK);
    let html = form.text();
    assert!(html.contains("multipart/form-data"));
    assert!(html.contains("E-book"));

    let resp = client.create_product("Rust Guide", "19,90").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    let location = resp.location().unwrap().to_owned();
    assert_eq!(
        location,
        "/products/new?success=product_created&name=Rust%20Guide"
    );

    let page = client.get(&location).await;
    let html = page.text();
    assert!(html.contains("Rust Guide"));
    assert!(html.contains("created successfully!"));
}

#[tokio::test]
async fn test_create_product_rejects_invalid_fields() {
    let mut client = signed_in("Ana", "ana%40example.com").await;

    for price in ["", "0", "-3", "free"] {
        let resp = client.create_product("Rust Guide", price).await;
        assert_eq!(
            resp.location(),
            Some("/products/new?error=invalid_product"),
            "price {price:?}"
        );
    }

    let resp = client
        .post_multipart(
            "/products",
            &[
                Part::Text("name", "Rust Guide"),
                Part::Text("price", "10"),
                Part::Text("category", "podcast"),
                Part::Text("description", "Audio"),
            ],
        )
        .await;
    assert_eq!(resp.location(), Some("/products/new?error=invalid_product"));

    let page = client.get("/products/new?error=invalid_product").await;
    assert!(page.text().contains("Fill in all fields correctly"));

    let list = client.get("/products").await;
    assert!(list.text().contains("No products registered"));
}

#[tokio::test]
async fn test_create_product_rejects_unsupported_image() {
    let mut client = signed_in("Ana", "ana%40example.com").await;

    let resp = client
        .post_multipart(
            "/products",
            &[
                Part::Text("name", "Rust Guide"),
                Part::Text("price", "10"),
                Part::Text("category", "course"),
                Part::Text("description", "Videos"),
                Part::File {
                    name: "image",
                    file_name: "cover.gif",
                    bytes: b"GIF89a",
                },
            ],
        )
        .await;
    assert_eq!(resp.location(), Some("/products/new?error=unsupported_image"));

    let page = client.get("/products/new?error=unsupported_image").await;
    assert!(page.text().contains("Image must be a JPG or PNG file"));
}

#[tokio::test]
async fn test_create_product_rejects_large_image() {
    let mut client = TestClient::with_config(StartifyConfig {
        max_image_bytes: 8,
        ..StartifyConfig::default()
    });
    client.signup("Ana", "ana%40example.com", "pw").await;

    let resp = client
        .post_multipart(
            "/products",
            &[
                Part::Text("name", "Rust Guide"),
                Part::Text("price", "10"),
                Part::Text("category", "course"),
                Part::Text("description", "Videos"),
                Part::File {
                    name: "image",
                    file_name: "cover.png",
                    bytes: PNG,
                },
            ],
        )
        .await;
    assert_eq!(resp.location(), Some("/products/new?error=image_too_large"));
}

#[tokio::test]
async fn test_create_product_over_body_limit() {
    let config = StartifyConfig {
        max_image_bytes: 8,
        ..StartifyConfig::default()
    };
    let oversized = vec![0_u8; config.upload_body_limit() + 128 * 1024];
    let mut client = TestClient::with_config(config);
    client.signup("Ana", "ana%40example.com", "pw").await;

    let resp = client
        .post_multipart(
            "/products",
            &[
                Part::Text("name", "Rust Guide"),
                Part::Text("price", "10"),
                Part::Text("category", "course"),
                Part::Text("description", "Videos"),
                Part::File {
                    name: "image",
                    file_name: "cover.png",
                    bytes: &oversized,
                },
            ],
        )
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/products/new?error=image_too_large"));

    let list = client.get("/products").await;
    assert!(!list.text().contains("Rust Guide"));
}

// ============================================================================
// List and dashboard
// ============================================================================

#[tokio::test]
async fn test_products_are_private_to_their_owner() {
    let mut ana = signed_in("Ana", "ana%40example.com").await;
    let mut bia = ana.sibling();
    bia.signup("Bia", "bia%40example.com", "pw").await;

    ana.create_product("Ana Course", "49.90").await;
    bia.create_product("Bia Templates", "15").await;

    let html = ana.get("/products").await.text();
    assert!(html.contains("Ana Course"));
    assert!(!html.contains("Bia Templates"));
    assert!(html.contains("R$ 49.90"));
    assert!(html.contains("Export CSV"));

    let html = bia.get("/products").await.text();
    assert!(html.contains("Bia Templates"));
    assert!(!html.contains("Ana Course"));
    assert!(html.contains("R$ 15.00"));
}

#[tokio::test]
async fn test_dashboard_counts_and_lists_latest() {
    let mut client = signed_in("Ana", "ana%40example.com").await;

    let empty = client.get("/dashboard").await.text();
    assert!(empty.contains("Products created"));
    assert!(empty.contains("Products sold (simulated)"));
    assert!(empty.contains("No products registered"));

    for i in 1..=6 {
        client.create_product(&format!("Guide{i}"), "10").await;
    }

    let html = client.get("/dashboard").await.text();
    assert!(html.contains("Latest products"));
    assert!(html.contains("Guide6 - R$ 10.00 - E-book"));
    assert!(html.contains("Guide2 - R$ 10.00 - E-book"));
    assert!(!html.contains("Guide1 - "));
}

// ============================================================================
// Export and images
// ============================================================================

#[tokio::test]
async fn test_export_csv() {
    let mut client = signed_in("Ana", "ana%40example.com").await;

    let nothing = client.get("/products/export.csv").await;
    assert_eq!(nothing.location(), Some("/products"));

    client.create_product("Rust Guide", "19,90").await;

    let resp = client.get("/products/export.csv").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.header("content-type"), Some("text/csv; charset=utf-8"));
    assert_eq!(
        resp.header("content-disposition"),
        Some("attachment; filename=\"my_products.csv\"")
    );

    let csv = resp.text();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("id,owner,name,price,category,description,image_bytes,created_at")
    );
    let row = lines.next().unwrap();
    assert!(row.contains(",ana,Rust Guide,19.90,E-book,A short guide,,"));
    assert!(lines.next().is_none());
}

#[tokio::test]
async fn test_image_is_served_to_owner_only() {
    let mut ana = signed_in("Ana", "ana%40example.com").await;
    let mut bia = ana.sibling();
    bia.signup("Bia", "bia%40example.com", "pw").await;

    let resp = ana
        .post_multipart(
            "/products",
            &[
                Part::Text("name", "Cover Pack"),
                Part::Text("price", "5"),
                Part::Text("category", "template"),
                Part::Text("description", "Covers"),
                Part::File {
                    name: "image",
                    file_name: "cover.png",
                    bytes: PNG,
                },
            ],
        )
        .await;
    assert!(resp.location().unwrap().contains("success=product_created"));

    let id = first_product_id(&mut ana).await;
    let image_url = format!("/products/{id}/image");

    assert!(ana.get("/products").await.text().contains(&image_url));

    let image = ana.get(&image_url).await;
    assert_eq!(image.status, StatusCode::OK);
    assert_eq!(image.header("content-type"), Some("image/png"));
    assert_eq!(&image.body[..], PNG);

    let other = bia.get(&image_url).await;
    assert_eq!(other.status, StatusCode::NOT_FOUND);
}
