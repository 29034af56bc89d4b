pub mod auth;

pub mod users;

pub mod staff;

pub mod subjects;

pub mod students;

pub mod classes;

pub mod homeroom;

pub mod extracurriculars;

pub mod posts;

pub mod pages;

pub mod facilities;

pub mod contacts;

pub mod galleries;

pub mod work_items;

pub mod google_drive;

pub mod dashboard;

pub mod files;

pub mod public;

pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use contacts::configure_contact_routes;
pub use dashboard::configure_dashboard_routes;
pub use extracurriculars::configure_extracurricular_routes;
pub use facilities::configure_facility_routes;
pub use files::configure_file_routes;
pub use galleries::configure_gallery_routes;
pub use google_drive::configure_google_drive_routes;
pub use homeroom::configure_homeroom_routes;
pub use pages::configure_page_routes;
pub use posts::configure_post_routes;
pub use public::configure_public_routes;
pub use staff::configure_staff_routes;
pub use students::configure_student_routes;
pub use subjects::configure_subject_routes;
pub use users::configure_user_routes;
pub use work_items::configure_work_item_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_staff_routes)
        .configure(configure_subject_routes)
        .configure(configure_student_routes)
        .configure(configure_classes_routes)
        .configure(configure_homeroom_routes)
        .configure(configure_extracurricular_routes)
        .configure(configure_post_routes)
        .configure(configure_page_routes)
        .configure(configure_facility_routes)
        .configure(configure_contact_routes)
        .configure(configure_gallery_routes)
        .configure(configure_work_item_routes)
        .configure(configure_google_drive_routes)
        .configure(configure_dashboard_routes)
        .configure(configure_file_routes)
        .configure(configure_public_routes);
}
