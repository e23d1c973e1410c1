//! Tests for raw request parsing.

#[cfg(test)]
mod tests {
    use crate::wire::{parse_request, Error, HttpVersion, InboundRequest, Method};

    #[test]
    fn test_parse_simple_get_request() {
        let request = b"GET /feedback?type=return HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method(), Method::GET);
        assert_eq!(result.uri, "/feedback?type=return");
        assert_eq!(result.version, HttpVersion::Http11);
        assert_eq!(result.get_header("Host"), Some("example.com"));
        assert!(result.body.is_empty());
    }

    #[test]
    fn test_parse_post_with_body() {
        let request = b"POST /feedback HTTP/1.1\r\nHost: example.com\r\nContent-Type: application/json\r\nContent-Length: 17\r\n\r\n{\"type\":\"return\"}";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method(), Method::POST);
        assert_eq!(result.body, b"{\"type\":\"return\"}");
        assert!(result.declares_body());
    }

    #[test]
    fn test_unknown_method_is_kept() {
        let request = b"purge /feedback HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method, "purge");
        assert_eq!(result.method(), Method::Other("PURGE".to_string()));
    }

    #[test]
    fn test_case_insensitive_headers() {
        let request = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert!(result.has_header("host"));
        assert!(result.has_header("HOST"));
        assert!(result.has_header("Host"));
    }

    #[test]
    fn test_missing_host_header() {
        let request = b"GET / HTTP/1.1\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::MissingHeader(ref h)) if h == "Host"));
    }

    #[test]
    fn test_http10_without_host() {
        let request = b"GET / HTTP/1.0\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.version, HttpVersion::Http10);
        assert!(result.headers.is_empty());
    }

    #[test]
    fn test_invalid_http_version() {
        let request = b"GET / HTTP/9.9\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidVersion(ref v)) if v == "HTTP/9.9"));
    }

    #[test]
    fn test_invalid_header_format() {
        let request = b"GET / HTTP/1.1\r\nInvalidHeader\r\n\r\n";
        let result = parse_request(request);
        assert_eq!(result.unwrap_err(), Error::InvalidHeaderFormat("InvalidHeader".to_string()));
    }

    #[test]
    fn test_non_utf8_head() {
        let result = parse_request(b"GET /\xff HTTP/1.1\r\nHost: example.com\r\n\r\n");
        assert_eq!(result.unwrap_err(), Error::InvalidUtf8);
    }

    #[test]
    fn test_empty_request() {
        assert!(matches!(parse_request(b""), Err(Error::EmptyRequest)));
    }

    #[test]
    fn test_incomplete_request_line() {
        let result = parse_request(b"GET\r\n");
        assert!(matches!(result, Err(Error::MalformedRequestLine(_))));
    }

    #[test]
    fn test_headers_with_multiple_colons() {
        let request = b"GET / HTTP/1.1\r\nHost: example.com\r\nX-Test: value:with:colons\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.get_header("X-Test"), Some("value:with:colons"));
    }

    #[test]
    fn test_query_strips_fragment() {
        let request = InboundRequest::new("GET", "https://example.com/feedback?a=1&b=2#top");
        assert_eq!(request.query(), Some("a=1&b=2"));
        assert_eq!(InboundRequest::new("GET", "/feedback").query(), None);
    }

    #[test]
    fn test_chunked_declares_body() {
        let request = InboundRequest::new("POST", "/").with_header("transfer-encoding", "Chunked");
        assert!(request.declares_body());
        assert!(!InboundRequest::new("POST", "/").declares_body());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::parse("get").to_string(), "GET");
        assert_eq!(Method::parse("Post").to_string(), "POST");
        assert_eq!(Method::parse("head").to_string(), "HEAD");
    }

    #[test]
    fn test_http_version_display() {
        assert_eq!(HttpVersion::Http10.to_string(), "HTTP/1.0");
        assert_eq!(HttpVersion::Http11.to_string(), "HTTP/1.1");
        assert_eq!(HttpVersion::Http20.to_string(), "HTTP/2");
    }

    #[test]
    fn test_bare_version_numbers() {
        assert_eq!("1.1".parse::<HttpVersion>().unwrap(), HttpVersion::Http11);
        assert_eq!("HTTP/2.0".parse::<HttpVersion>().unwrap(), HttpVersion::Http20);
        assert_eq!(HttpVersion::Http10.number(), "1.0");
        assert!(!HttpVersion::Http20.requires_host());
    }
}
