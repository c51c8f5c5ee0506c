pub mod analytics;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod recommend;

pub use analytics::{ProductRevenue, SalesSummary};
pub use catalog::Catalog;
pub use domain::cart::Cart;
pub use domain::customer::{Customer, CustomerId, PurchaseRecord};
pub use domain::order::{Order, OrderId, OrderLine};
pub use domain::product::{Product, ProductId};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use recommend::{Recommendation, RecommendationSource, Recommender};
