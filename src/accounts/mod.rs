pub mod dto;
pub mod handlers;
pub mod repo;
pub mod workflows;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // primary family
        .route("/SignUp", post(handlers::sign_up))
        .route("/SignIn", post(handlers::sign_in))
        .route("/Logout", post(handlers::logout))
        .route("/getUser", get(handlers::get_users))
        .route("/getUserById/:id", get(handlers::get_user_by_id))
        .route("/updateUser/:userId", put(handlers::update_user))
        .route("/ForgotPassword", post(handlers::forgot_password))
        .route(
            "/ResetPassword/:id/:token",
            get(handlers::verify_reset_link).post(handlers::forgot_reset),
        )
        .route("/ResetPasswordSendOTP", get(handlers::send_reset_otp))
        .route("/ResetPasswordVerifyOTP", post(handlers::verify_reset_otp))
        .route("/ResetPassword", post(handlers::reset_password))
        .route("/userVerify", get(handlers::user_verify))
        // admin / super-admin provisioning
        .route("/create/admin", post(handlers::create_admin))
        .route("/update/admin/:adminId", put(handlers::update_admin))
        .route("/delete/admin/:id", delete(handlers::delete_admin))
        .route("/create/superAdmin", post(handlers::create_super_admin))
        .route(
            "/update/superAdmin/:superAdminId",
            put(handlers::update_super_admin),
        )
        .route("/delete/superAdmin/:id", delete(handlers::delete_super_admin))
        // access-user family
        .route("/create/userAccess", post(handlers::create_access_user))
        .route("/user/signin", post(handlers::access_sign_in))
        .route("/user/Verify", get(handlers::access_verify))
        .route("/getAll/userAccess", get(handlers::get_access_users))
        .route(
            "/getById/userAccess/:id",
            get(handlers::get_access_user_by_id),
        )
        .route(
            "/update/userAccess/:userId",
            put(handlers::update_access_user),
        )
        .route(
            "/delete/userAccess/:userId",
            delete(handlers::delete_access_user),
        )
        .route("/user/ForgotPassword", post(handlers::access_forgot_password))
        .route(
            "/user/ResetPassword/:id/:token",
            get(handlers::access_verify_reset_link),
        )
        .route(
            "/users/ResetPassword/:id/:token",
            post(handlers::access_forgot_reset),
        )
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
}
