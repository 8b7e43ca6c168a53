use reqwest::{
    Response,
    header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE},
};
use secrecy::Secret;
use serde_json::{Value, json};
use turnstile_adapters::{
    config::{
        AllowedOrigins, AuthSetting, TokenSetting,
        constants::{API_PREFIX, test},
    },
    persistence::HashMapUserStore,
};
use turnstile_service::UserService;

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
}

impl TestApp {
    pub async fn new() -> Self {
        let auth = AuthSetting {
            access_token: TokenSetting {
                secret: Secret::from("test-access-token-secret".to_owned()),
                time_to_live: 900,
            },
            refresh_token: TokenSetting {
                secret: Secret::from("test-refresh-token-secret".to_owned()),
                time_to_live: 864_000,
            },
            allowed_origins: AllowedOrigins::default(),
        };
        let router = UserService::new(HashMapUserStore::new(), &auth).as_nested_router(None);

        let listener = tokio::net::TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Failed to run test server");
        });

        Self {
            address,
            http_client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.address, API_PREFIX, path)
    }

    pub async fn post_register<Body: serde::Serialize>(&self, body: &Body) -> Response {
        self.http_client
            .post(self.url("/register"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_login<Body: serde::Serialize>(&self, body: &Body) -> Response {
        self.http_client
            .post(self.url("/login"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_login_raw(&self, body: &'static str) -> Response {
        self.http_client
            .post(self.url("/login"))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_logout_with_cookie(&self, access_token: &str) -> Response {
        self.http_client
            .post(self.url("/logout"))
            .header(COOKIE, format!("accessToken={access_token}"))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_logout(&self) -> Response {
        self.http_client
            .post(self.url("/logout"))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_refresh_with_cookie(&self, refresh_token: &str) -> Response {
        self.http_client
            .post(self.url("/refresh-token"))
            .header(COOKIE, format!("refreshToken={refresh_token}"))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_refresh_with_body(&self, refresh_token: &str) -> Response {
        self.http_client
            .post(self.url("/refresh-token"))
            .json(&json!({ "refreshToken": refresh_token }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_refresh_without_token(&self) -> Response {
        self.http_client
            .post(self.url("/refresh-token"))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_change_password<Body: serde::Serialize>(
        &self,
        access_token: &str,
        body: &Body,
    ) -> Response {
        self.http_client
            .post(self.url("/change-password"))
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_current_user(&self, access_token: &str) -> Response {
        self.http_client
            .get(self.url("/current-user"))
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_current_user_with_cookie(&self, access_token: &str) -> Response {
        self.http_client
            .get(self.url("/current-user"))
            .header(COOKIE, format!("accessToken={access_token}"))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn patch<Body: serde::Serialize>(
        &self,
        path: &str,
        access_token: Option<&str>,
        body: &Body,
    ) -> Response {
        let mut request = self.http_client.patch(self.url(path)).json(body);
        if let Some(token) = access_token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        request.send().await.expect("Failed to execute request.")
    }

    /// Registers the given account and logs it in by username.
    pub async fn signed_in(&self, username: &str, email: &str, password: &str) -> Session {
        let response = self
            .post_register(&registration(username, email, password))
            .await;
        assert_eq!(response.status().as_u16(), 201);

        let response = self
            .post_login(&json!({ "username": username, "password": password }))
            .await;
        assert_eq!(response.status().as_u16(), 200);

        let body: Value = response.json().await.unwrap();
        Session {
            access_token: body["data"]["accessToken"].as_str().unwrap().to_owned(),
            refresh_token: body["data"]["refreshToken"].as_str().unwrap().to_owned(),
        }
    }
}

pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
}

pub fn registration(username: &str, email: &str, password: &str) -> Value {
    json!({
        "fullName": "Alice Liddell",
        "email": email,
        "username": username,
        "password": password,
    })
}

/// The raw `Set-Cookie` header for `name`, if the response set one.
pub fn set_cookie(response: &Response, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&prefix))
        .map(str::to_owned)
}

/// The value part of a `Set-Cookie` header.
pub fn cookie_value(set_cookie: &str) -> &str {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.split_once('='))
        .map(|(_, value)| value)
        .unwrap_or_default()
}
