use http_body_util::Full;
use hyper::{
    body::Bytes,
    header::{HeaderName, HeaderValue},
    HeaderMap, Method, Request as HyperRequest,
};

#[derive(Clone, Default)]
pub struct Request {
    uri: Option<String>,
    method: Option<Method>,
    headers: HeaderMap,
    body: Option<Full<Bytes>>,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn header(mut self, name: impl Into<HeaderName>, value: impl Into<HeaderValue>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: Full<Bytes>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn build(self) -> Result<HyperRequest<Full<Bytes>>, hyper::http::Error> {
        let mut builder = HyperRequest::builder().uri(self.uri.unwrap_or_default());
        if let Some(method) = self.method {
            builder = builder.method(method);
        }
        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = self.body {
            builder.body(body)
        } else {
            builder.body(Full::default())
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
