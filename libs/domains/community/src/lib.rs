//! Community Domain
//!
//! Everything users add around the product catalogue: reviews with a 1 to 5
//! rating, discount coupons, newsletter sign-ups and help requests.
//!
//! ```rust,no_run
//! use domain_community::{CommunityService, InMemoryCommunityRepository, handlers};
//!
//! let service = CommunityService::new(InMemoryCommunityRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{CommunityError, CommunityResult};
pub use handlers::ApiDoc;
pub use models::{
    Coupon, CouponMutation, CreateCoupon, CreateHelpRequest, CreateNewsletterSubscription,
    CreateReview, HelpMutation, HelpRequest, MessageResponse, NewsletterMutation,
    NewsletterSubscription, Review, ReviewCreated,
};
pub use mongodb::MongoCommunityRepository;
pub use repository::{CommunityRepository, InMemoryCommunityRepository};
pub use service::CommunityService;
