mod assignees;
mod requests;
pub(crate) mod responses;
mod schedule;
pub(crate) mod time_slots;
mod users;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    users::config(cfg);
    assignees::config(cfg);
    time_slots::config(cfg);
    schedule::config(cfg);
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, rt::System, test, web, App};

    use super::config;
    use crate::database::{build_pool, init_schema};

    const ROUTES: [&str; 17] = [
        "/admin/add_user",
        "/admin/search_user",
        "/admin/modify_user",
        "/admin/delete_user",
        "/admin/add_assignee",
        "/admin/search_assignee",
        "/admin/modify_assignee",
        "/admin/delete_assignee",
        "/admin/add_time_slot",
        "/admin/search_time_slot",
        "/admin/modify_time_slot",
        "/admin/delete_time_slot",
        "/admin/upsert_slot",
        "/admin/delete_slot",
        "/admin/search_schedule",
        "/admin/populate_week",
        "/admin/reset_range",
    ];

    #[test]
    fn every_admin_route_is_mounted() {
        System::new("admin-routes").block_on(async {
            let pool = build_pool(":memory:", 1).unwrap();
            init_schema(&pool.get().unwrap()).unwrap();
            let mut app = test::init_service(
                App::new()
                    .data(pool)
                    .service(web::scope("/admin").configure(config)),
            )
            .await;

            for route in ROUTES.iter() {
                let req = test::TestRequest::post()
                    .uri(route)
                    .set_json(&serde_json::json!({ "login_token": "stale", "id": 1 }))
                    .to_request();
                let resp = test::call_service(&mut app, req).await;
                assert_ne!(resp.status(), StatusCode::NOT_FOUND, "{}", route);
            }
        });
    }
}
