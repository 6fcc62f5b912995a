//! Demo catalog and articles for a fresh store.

use shop_hex::application::storefront::Storefront;
use shop_hex::errors::AppError;
use shop_types::domain::product::{Category, Product};
use shop_types::ports::cart_store::CartStore;
use shop_types::ports::ShopRepository;

pub fn demo_products() -> Vec<Product> {
    vec![
        Product::new("bb-classic", "Gelas Bambu Classic", 45_000, Category::BambooGlass)
            .with_description("Gelas bambu alami dengan finishing food-grade.")
            .popular(),
        Product::new("bb-mini", "Gelas Bambu Mini", 30_000, Category::BambooGlass).new_arrival(),
        Product::new(
            "at-natural",
            "Gelas Ampas Tebu Natural",
            35_000,
            Category::SugarcanePulpGlass,
        )
        .with_description("Dibuat dari ampas tebu, terurai alami.")
        .popular(),
        Product::new("at-duo", "Gelas Ampas Tebu Duo", 65_000, Category::SugarcanePulpGlass),
        Product::new("mx-family", "Mix Eco Family Set", 150_000, Category::MixedEcoSeries)
            .popular()
            .new_arrival(),
        Product::new("le-batik", "Gelas Bambu Motif Batik", 120_000, Category::LimitedEdition)
            .new_arrival(),
    ]
}

const DEMO_POSTS: [(&str, &str); 3] = [
    (
        "Tips Merawat Gelas Bambu Agar Awet",
        "Gelas bambu memerlukan perawatan khusus agar dapat bertahan lama. Cuci dengan air hangat, hindari mesin pencuci piring, dan keringkan di tempat yang berangin.",
    ),
    (
        "Program Tanam 1000 Pohon Bambu",
        "Setiap pembelian 100 produk, FAMINI menanam 1000 bibit bambu di berbagai daerah Indonesia.",
    ),
    (
        "Mengapa Memilih Gelas Ramah Lingkungan?",
        "Gelas dari bahan alami seperti bambu dan ampas tebu tidak mengandung BPA yang sering ditemukan pada plastik.",
    ),
];

/// Fills an empty catalog. Does nothing when products already exist.
pub async fn seed_demo_data<R, S>(shop: &Storefront<R, S>) -> Result<usize, AppError>
where
    R: ShopRepository,
    S: CartStore + Clone,
{
    let existing = shop
        .catalog
        .list_products(None, Default::default())
        .await?;
    if !existing.is_empty() {
        tracing::debug!(products = existing.len(), "catalog already populated; skipping seed");
        return Ok(0);
    }

    let products = demo_products();
    let count = products.len();
    for p in products {
        shop.catalog.save_product(p).await?;
    }
    for (title, content) in DEMO_POSTS {
        shop.blog.publish(title, Some(content.to_string()), None).await?;
    }
    tracing::info!(products = count, posts = DEMO_POSTS.len(), "seeded demo data");
    Ok(count)
}
