//! Request loggers for route groups, one per log level.

use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    Error,
};

fn describe(req: &ServiceRequest) -> String {
    let params: Vec<String> = req
        .match_info()
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect();

    format!(
        "{} {} params=[{}] query={:?}",
        req.method(),
        req.path(),
        params.join(", "),
        req.query_string()
    )
}

pub async fn log_request(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    log::info!("Request logged: {}", describe(&req));
    next.call(req).await
}

pub async fn warn_request(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    log::warn!("Warning occurred: {}", describe(&req));
    next.call(req).await
}

pub async fn error_request(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    log::error!("Error occurred: {}", describe(&req));
    next.call(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_describe_request() {
        let req = TestRequest::get().uri("/api/users?page=2").to_srv_request();

        let description = describe(&req);

        assert!(description.starts_with("GET /api/users"));
        assert!(description.contains("page=2"));
    }
}
