//! The static in-memory product catalog.
//!
//! There is no inventory system behind the storefront; the catalog is a
//! fixed set of motorcycle parts and accessories built at startup. Lookups,
//! text search, and category filtering all run over this in-memory list.

use rust_decimal::Decimal;

use moto_shop_core::{Category, CategoryId, Price, Product, ProductId, Specifications};

/// The product catalog with its category tree.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All categories, in sidebar order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Filter products by a case-insensitive text query over name and
    /// description, and/or by category.
    #[must_use]
    pub fn search(&self, query: Option<&str>, category: Option<&CategoryId>) -> Vec<&Product> {
        let needle = query.map(str::to_lowercase);
        self.products
            .iter()
            .filter(|p| category.is_none_or(|c| &p.category == c))
            .filter(|p| {
                needle.as_deref().is_none_or(|q| {
                    p.name.to_lowercase().contains(q) || p.description.to_lowercase().contains(q)
                })
            })
            .collect()
    }

    /// The built-in MotoShop catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            products: builtin_products(),
            categories: builtin_categories(),
        }
    }
}

fn category(id: &str, name: &str, icon: &str, subcategories: &[&str]) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_owned(),
        icon: icon.to_owned(),
        subcategories: subcategories.iter().map(|&s| s.to_owned()).collect(),
    }
}

fn builtin_categories() -> Vec<Category> {
    vec![
        category(
            "capacetes",
            "Capacetes",
            "🪖",
            &["Integral", "Articulado", "Aberto"],
        ),
        category(
            "vestuario",
            "Vestuário",
            "🧥",
            &["Jaquetas", "Luvas", "Calças"],
        ),
        category("escapamentos", "Escapamentos", "🔧", &[]),
        category("pneus", "Pneus", "🛞", &["Dianteiro", "Traseiro"]),
        category("oleos", "Óleos e Fluidos", "🛢️", &[]),
        category("acessorios", "Acessórios", "🎒", &["Baús", "Suportes"]),
    ]
}

/// Shorthand constructor for catalog entries. Prices are in centavos.
#[allow(clippy::too_many_arguments)]
fn entry(
    id: &str,
    name: &str,
    description: &str,
    price_cents: i64,
    category: &str,
    image_count: u32,
    rating: f32,
    review_count: u32,
    in_stock: bool,
    specifications: Option<Specifications>,
) -> Product {
    let images = (1..=image_count)
        .map(|n| format!("/images/products/{id}-{n}.jpg"))
        .collect();
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        price: Price::brl(Decimal::new(price_cents, 2)),
        category: CategoryId::new(category),
        images,
        rating,
        review_count,
        in_stock,
        specifications,
    }
}

fn sizes(values: &[&str]) -> Vec<String> {
    values.iter().map(|&s| s.to_owned()).collect()
}

fn builtin_products() -> Vec<Product> {
    vec![
        entry(
            "1",
            "Capacete Integral Touring",
            "Capacete integral com viseira solar interna, forro removível e certificação DOT.",
            89_990,
            "capacetes",
            3,
            4.8,
            127,
            true,
            Some(Specifications {
                size: sizes(&["54", "56", "58", "60"]),
                color: sizes(&["Preto Fosco", "Branco", "Vermelho"]),
                weight: Some("1550g".to_owned()),
                material: Some("Fibra composta".to_owned()),
                ..Specifications::default()
            }),
        ),
        entry(
            "2",
            "Capacete Articulado City",
            "Capacete modular com queixeira rebatível, ideal para uso urbano diário.",
            64_990,
            "capacetes",
            2,
            4.6,
            89,
            true,
            Some(Specifications {
                size: sizes(&["56", "58", "60"]),
                color: sizes(&["Preto", "Cinza"]),
                weight: Some("1700g".to_owned()),
                ..Specifications::default()
            }),
        ),
        entry(
            "3",
            "Jaqueta Cordura Adventure",
            "Jaqueta impermeável com proteções CE nos ombros e cotovelos e forro térmico removível.",
            79_990,
            "vestuario",
            3,
            4.7,
            203,
            true,
            Some(Specifications {
                size: sizes(&["P", "M", "G", "GG"]),
                color: sizes(&["Preto", "Preto/Cinza"]),
                material: Some("Cordura 600D".to_owned()),
                ..Specifications::default()
            }),
        ),
        entry(
            "4",
            "Luvas de Couro Sport",
            "Luvas de couro com proteção rígida nos nós dos dedos e palma reforçada.",
            18_990,
            "vestuario",
            2,
            4.5,
            156,
            true,
            Some(Specifications {
                size: sizes(&["P", "M", "G"]),
                color: sizes(&["Preto"]),
                material: Some("Couro bovino".to_owned()),
                ..Specifications::default()
            }),
        ),
        entry(
            "5",
            "Escapamento Esportivo Slip-On",
            "Ponteira esportiva em aço inox com abafador removível. Som grave e ganho de potência.",
            119_990,
            "escapamentos",
            3,
            4.9,
            74,
            true,
            None,
        ),
        entry(
            "6",
            "Pneu Traseiro 180/55-17",
            "Pneu radial esportivo com composto dual e excelente aderência em piso molhado.",
            94_990,
            "pneus",
            1,
            4.8,
            312,
            true,
            None,
        ),
        entry(
            "7",
            "Pneu Dianteiro 120/70-17",
            "Pneu radial dianteiro de alta durabilidade para uso misto estrada e cidade.",
            62_990,
            "pneus",
            1,
            4.7,
            241,
            true,
            None,
        ),
        entry(
            "8",
            "Óleo Sintético 10W-40 1L",
            "Lubrificante 100% sintético para motores de 4 tempos com embreagem banhada a óleo.",
            5_490,
            "oleos",
            1,
            4.6,
            518,
            true,
            None,
        ),
        entry(
            "9",
            "Baú 45L com Base Universal",
            "Baú rígido com capacidade para dois capacetes, refletores e base de fixação universal.",
            39_990,
            "acessorios",
            2,
            4.4,
            98,
            true,
            Some(Specifications {
                color: sizes(&["Preto", "Preto/Vermelho"]),
                ..Specifications::default()
            }),
        ),
        entry(
            "10",
            "Bolha Esportiva Fumê",
            "Bolha em policarbonato com tratamento anti-risco, disponível em três alturas.",
            24_990,
            "acessorios",
            2,
            4.3,
            45,
            true,
            Some(Specifications {
                height: sizes(&["Baixa", "Média", "Alta"]),
                color: sizes(&["Fumê", "Cristal"]),
                material: Some("Policarbonato 3mm".to_owned()),
                ..Specifications::default()
            }),
        ),
        entry(
            "11",
            "Intercomunicador Bluetooth Duo",
            "Par de intercomunicadores com alcance de 1km, rádio FM e bateria para 12h de conversa.",
            54_990,
            "acessorios",
            2,
            4.5,
            167,
            false,
            None,
        ),
        entry(
            "12",
            "Calça Têxtil Impermeável",
            "Calça com proteções CE nos joelhos, ajuste no tornozelo e membrana impermeável.",
            49_990,
            "vestuario",
            2,
            4.4,
            82,
            true,
            Some(Specifications {
                size: sizes(&["38", "40", "42", "44", "46"]),
                color: sizes(&["Preto"]),
                ..Specifications::default()
            }),
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_consistent() {
        let catalog = Catalog::builtin();
        assert!(!catalog.products().is_empty());

        // Every product belongs to a declared category and has a unique id
        for (i, product) in catalog.products().iter().enumerate() {
            assert!(
                catalog.categories().iter().any(|c| c.id == product.category),
                "product {} has unknown category",
                product.id
            );
            assert!(
                catalog
                    .products()
                    .iter()
                    .skip(i + 1)
                    .all(|other| other.id != product.id),
                "duplicate product id {}",
                product.id
            );
        }
    }

    #[test]
    fn test_product_lookup() {
        let catalog = Catalog::builtin();
        let found = catalog.product(&ProductId::new("1")).unwrap();
        assert!(found.name.contains("Capacete"));

        assert!(catalog.product(&ProductId::new("999")).is_none());
    }

    #[test]
    fn test_search_by_text_is_case_insensitive() {
        let catalog = Catalog::builtin();
        let hits = catalog.search(Some("PNEU"), None);
        assert!(hits.len() >= 2);
        assert!(hits.iter().all(|p| p.name.to_lowercase().contains("pneu")));
    }

    #[test]
    fn test_search_by_category() {
        let catalog = Catalog::builtin();
        let category = CategoryId::new("vestuario");
        let hits = catalog.search(None, Some(&category));
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|p| p.category == category));
    }

    #[test]
    fn test_search_combines_filters() {
        let catalog = Catalog::builtin();
        let category = CategoryId::new("vestuario");
        let hits = catalog.search(Some("luvas"), Some(&category));
        assert_eq!(hits.len(), 1);

        let none = catalog.search(Some("luvas"), Some(&CategoryId::new("pneus")));
        assert!(none.is_empty());
    }
}
