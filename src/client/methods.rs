//! Method sugar over [`HttpClient::execute`].

use crate::client::HttpClient;
use crate::error::ClientResult;
use crate::http::{Method, RequestDescriptor, RequestOptions, ResponseRecord, SessionContext};

impl HttpClient {
    /// Generic call; the method comes from `options` (GET if unset).
    pub async fn request(
        &self,
        url: impl Into<String>,
        options: RequestOptions,
        session: SessionContext,
    ) -> ClientResult<ResponseRecord> {
        self.execute(RequestDescriptor {
            url: url.into(),
            options,
            session,
        })
        .await
    }

    /// Same as [`request`](Self::request), named after the fetch-style API.
    pub async fn fetch(
        &self,
        url: impl Into<String>,
        options: RequestOptions,
        session: SessionContext,
    ) -> ClientResult<ResponseRecord> {
        self.request(url, options, session).await
    }

    pub async fn get(
        &self,
        url: impl Into<String>,
        options: RequestOptions,
        session: SessionContext,
    ) -> ClientResult<ResponseRecord> {
        self.request(url, options.method(Method::GET), session).await
    }

    pub async fn post(
        &self,
        url: impl Into<String>,
        options: RequestOptions,
        session: SessionContext,
    ) -> ClientResult<ResponseRecord> {
        self.request(url, options.method(Method::POST), session).await
    }

    pub async fn put(
        &self,
        url: impl Into<String>,
        options: RequestOptions,
        session: SessionContext,
    ) -> ClientResult<ResponseRecord> {
        self.request(url, options.method(Method::PUT), session).await
    }

    pub async fn delete(
        &self,
        url: impl Into<String>,
        options: RequestOptions,
        session: SessionContext,
    ) -> ClientResult<ResponseRecord> {
        self.request(url, options.method(Method::DELETE), session).await
    }
}
