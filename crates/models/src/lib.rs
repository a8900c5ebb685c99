pub mod errors;
pub mod db;
pub mod validate;
pub mod entity_status;
pub mod crop;
pub mod category;
pub mod article;
pub mod crop_category;
pub mod article_relation;
pub mod article_image;
