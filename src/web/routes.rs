// src/web/routes.rs
use crate::{
    state::AppState,
    web::{auth_handlers, cadastro_handlers, mw_auth, perfil_handlers},
};
use axum::{
    middleware,
    response::Redirect,
    routing::{get, post},
    Router,
};

pub fn create_router(app_state: AppState) -> Router {
    // --- Rotas Públicas ---
    let public_routes = Router::new()
        .route("/", get(auth_handlers::show_login_form))
        .route(
            "/login",
            get(|| async { Redirect::to("/") }).post(auth_handlers::handle_login),
        )
        .route("/recuperar-senha", post(auth_handlers::handle_password_recovery))
        .route(
            "/cadastro",
            get(cadastro_handlers::show_cadastro_form).post(cadastro_handlers::handle_cadastro),
        )
        .route("/logout", get(auth_handlers::handle_logout));

    // --- Rotas Autenticadas ---
    // Sem sessão ativa o middleware redireciona para "/"
    let authenticated_routes = Router::new()
        .route("/perfil", get(perfil_handlers::perfil_page_handler))
        .route_layer(middleware::from_fn(mw_auth::require_session));

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::{MemoryUserStore, UserStore};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;
    use tower_cookies::{CookieManagerLayer, Key};
    use tower_sessions::{MemoryStore, SessionManagerLayer};

    fn app(store: Arc<MemoryUserStore>) -> Router {
        let state = AppState::new(store, Key::generate());
        create_router(state)
            .layer(CookieManagerLayer::new())
            .layer(SessionManagerLayer::new(MemoryStore::default()).with_secure(false))
    }

    fn form_post(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response.headers()[header::LOCATION].to_str().unwrap()
    }

    // Junta os Set-Cookie da resposta num cabeçalho Cookie
    fn cookies_from(response: &Response) -> String {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .collect::<Vec<_>>()
            .join("; ")
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    const ANA: &str = "name=Ana+Silva&email=ana%40x.com&cpf=123.456.789-09&course=CS\
        &userType=aluno&password=senha123&confirmPassword=senha123";

    #[tokio::test]
    async fn entry_page_renders_login_form() {
        let response = app(Arc::default()).oneshot(get("/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("action=\"/login\""));
        assert!(html.contains("Esqueci minha senha"));
    }

    #[tokio::test]
    async fn profile_without_session_redirects_to_entry() {
        let response = app(Arc::default()).oneshot(get("/perfil", None)).await.unwrap();
        assert!(response.status().is_redirection());
        assert_eq!(location(&response), "/");
    }

    #[tokio::test]
    async fn registration_over_http_persists_normalized_record() {
        let store = Arc::new(MemoryUserStore::new());
        let response = app(store.clone()).oneshot(form_post("/cadastro", ANA, None)).await.unwrap();
        assert!(response.status().is_redirection());
        assert_eq!(location(&response), "/");

        let users = store.load_all().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].cpf.as_str(), "12345678909");
    }

    #[tokio::test]
    async fn duplicate_registration_re_renders_form_with_notice() {
        let store = Arc::new(MemoryUserStore::new());
        let app = app(store.clone());
        app.clone().oneshot(form_post("/cadastro", ANA, None)).await.unwrap();

        let response = app.oneshot(form_post("/cadastro", ANA, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("CPF já cadastrado!"));
        assert_eq!(store.load_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_registration_shows_inline_errors() {
        let store = Arc::new(MemoryUserStore::new());
        let body = "name=&email=x&cpf=123&course=&userType=&password=a&confirmPassword=b";
        let response = app(store.clone()).oneshot(form_post("/cadastro", body, None)).await.unwrap();
        let html = body_text(response).await;
        assert!(html.contains("Nome completo é obrigatório"));
        assert!(html.contains("As senhas não coincidem"));
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn wrong_password_shows_generic_message() {
        let store = Arc::new(MemoryUserStore::new());
        let app = app(store);
        app.clone().oneshot(form_post("/cadastro", ANA, None)).await.unwrap();

        let response = app
            .oneshot(form_post("/login", "cpf=123.456.789-09&password=errada123", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("CPF ou senha inválidos!"));
    }

    #[tokio::test]
    async fn login_profile_logout_cycle() {
        let app = app(Arc::new(MemoryUserStore::new()));
        app.clone().oneshot(form_post("/cadastro", ANA, None)).await.unwrap();

        let response = app
            .clone()
            .oneshot(form_post("/login", "cpf=123.456.789-09&password=senha123", None))
            .await
            .unwrap();
        assert_eq!(location(&response), "/perfil");
        let cookie = cookies_from(&response);

        let response = app.clone().oneshot(get("/perfil", Some(&cookie))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Ana Silva"));
        assert!(html.contains("123.456.789-09"));
        assert!(html.contains("Aluno"));
        assert!(html.contains("Login realizado com sucesso!"));

        let response = app.clone().oneshot(get("/logout", Some(&cookie))).await.unwrap();
        assert_eq!(location(&response), "/");

        let response = app.oneshot(get("/perfil", Some(&cookie))).await.unwrap();
        assert_eq!(location(&response), "/");
    }

    #[tokio::test]
    async fn recovery_with_invalid_email_keeps_panel_open() {
        let response = app(Arc::default())
            .oneshot(form_post("/recuperar-senha", "recoveryEmail=ana%40x", None))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("E-mail inválido"));
        assert!(html.contains("<details open"));
    }

    #[tokio::test]
    async fn recovery_with_valid_email_redirects_with_notice() {
        let app = app(Arc::default());
        let response = app
            .clone()
            .oneshot(form_post("/recuperar-senha", "recoveryEmail=ana%40x.com", None))
            .await
            .unwrap();
        assert_eq!(location(&response), "/");

        let cookie = cookies_from(&response);
        let response = app.oneshot(get("/", Some(&cookie))).await.unwrap();
        assert!(body_text(response).await.contains("E-mail de recuperação enviado!"));
    }
}
