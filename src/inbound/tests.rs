//! Tests for the inbound adapters.

#[cfg(test)]
mod feedback_tests {
    use serde_json::{json, Value};

    use crate::codec::{HttpError, StatusCode};
    use crate::inbound::feedback;
    use crate::wire::InboundRequest;

    fn base_request(accept: Option<&str>) -> InboundRequest {
        InboundRequest::new("post", "/whatever")
            .with_header("Accept", accept.unwrap_or("application/xml"))
            .with_header("Content-Type", "application/x-www-form-urlencoded")
            .with_body("first_name=Joe")
    }

    fn vars() -> Value {
        json!({
            "lead": { "id": "123", "email": "foo@bar.com" },
            "price": 1.5,
            "outcome": "failure",
            "reason": "bad!"
        })
    }

    const FAILURE_XML: &str = "<?xml version=\"1.0\"?>\n<result>\n  <outcome>failure</outcome>\n  <reason>bad!</reason>\n  <lead>\n    <id>123</id>\n    <first_name/>\n    <last_name/>\n    <email>foo@bar.com</email>\n    <phone_1/>\n  </lead>\n  <price>-1.5</price>\n</result>";

    #[test]
    fn test_method_not_allowed() {
        for method in ["head", "put", "delete", "patch"] {
            let err = feedback::request(&InboundRequest::new(method, "/feedback")).unwrap_err();
            assert_eq!(err.status(), StatusCode::UnsupportedMediaType);
            assert_eq!(err.to_string(), format!("The {} method is not allowed", method.to_uppercase()));
            let response = err.into_response();
            assert_eq!(response.header("Allow"), Some("GET, POST"));
            assert_eq!(response.header("Content-Type"), Some("text/plain"));
        }
    }

    #[test]
    fn test_handles_get() {
        let request = InboundRequest::new(
            "GET",
            "https://app.leadconduit.com/feedback?event_id=12345&type=return&reason=Wrong+number",
        )
        .with_header("Accept", "application/json");
        assert_eq!(
            feedback::request(&request).unwrap(),
            json!({ "type": "return", "reason": "Wrong number" })
        );
    }

    #[test]
    fn test_handles_form_post() {
        let body = "type=return&reason=Wrong+number";
        let request = InboundRequest::new("POST", "https://app.leadconduit.com/feedback?event_id=12345")
            .with_header("Content-Type", "application/x-www-form-urlencoded")
            .with_header("Accept", "application/json")
            .with_header("Content-Length", body.len().to_string())
            .with_body(body);
        assert_eq!(
            feedback::request(&request).unwrap(),
            json!({ "type": "return", "reason": "Wrong number" })
        );
    }

    #[test]
    fn test_unacceptable_accept_header() {
        let request = InboundRequest::new("GET", "/feedback?type=return").with_header("Accept", "image/png");
        let err = feedback::request(&request).unwrap_err();
        assert_eq!(err, HttpError::NotAcceptable);
        assert_eq!(err.status(), StatusCode::NotAcceptable);
    }

    #[test]
    fn test_method_checked_before_accept() {
        let request = InboundRequest::new("DELETE", "/feedback").with_header("Accept", "image/png");
        assert!(matches!(feedback::request(&request), Err(HttpError::MethodNotAllowed(_))));
    }

    #[test]
    fn test_responds_with_json() {
        let res = feedback::response(&base_request(Some("application/json")), &vars(), None);
        assert_eq!(res.status, StatusCode::Created);
        assert_eq!(
            res.body_str(),
            r#"{"outcome":"failure","reason":"bad!","lead":{"id":"123","email":"foo@bar.com"},"price":-1.5}"#
        );
        assert_eq!(res.header("Content-Type"), Some("application/json"));
        assert_eq!(res.header("Content-Length"), Some("92"));
    }

    #[test]
    fn test_defaults_to_json() {
        let res = feedback::response(&base_request(Some("*/*")), &vars(), None);
        assert_eq!(res.status, StatusCode::Created);
        assert_eq!(res.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_forbidden_reason_is_conflict() {
        let mut vars = vars();
        vars["reason"] = json!("Feedback is forbidden");
        let res = feedback::response(&base_request(Some("*/*")), &vars, None);
        assert_eq!(res.status, StatusCode::Conflict);
    }

    #[test]
    fn test_responds_with_text_xml() {
        let res = feedback::response(&base_request(Some("text/xml")), &vars(), None);
        assert_eq!(res.status, StatusCode::Created);
        assert_eq!(res.header("Content-Type"), Some("text/xml"));
        assert_eq!(res.header("Content-Length"), Some("232"));
        assert_eq!(res.body_str(), FAILURE_XML);
    }

    #[test]
    fn test_responds_with_application_xml() {
        let res = feedback::response(&base_request(None), &vars(), None);
        assert_eq!(res.header("Content-Type"), Some("application/xml"));
        assert_eq!(res.body_str(), FAILURE_XML);
    }

    #[test]
    fn test_success_keeps_price() {
        let mut vars = vars();
        vars["outcome"] = json!("success");
        let res = feedback::response(&base_request(Some("application/json")), &vars, Some(&["outcome", "price"]));
        assert_eq!(res.body_str(), r#"{"outcome":"success","price":1.5}"#);
    }

    #[test]
    fn test_failure_match_is_exact() {
        let mut vars = vars();
        vars["outcome"] = json!("Failure");
        let res = feedback::response(&base_request(Some("application/json")), &vars, Some(&["outcome", "price"]));
        assert_eq!(res.body_str(), r#"{"outcome":"Failure","price":1.5}"#);
    }

    #[test]
    fn test_failure_without_price_refunds_null() {
        let vars = json!({ "outcome": "failure", "lead": { "id": "1" } });
        let res = feedback::response(&base_request(Some("application/json")), &vars, None);
        assert_eq!(res.body_str(), r#"{"outcome":"failure","lead":{"id":"1"},"price":null}"#);

        let res = feedback::response(&base_request(Some("text/xml")), &vars, Some(&["outcome", "price"]));
        assert_eq!(
            res.body_str(),
            "<?xml version=\"1.0\"?>\n<result>\n  <outcome>failure</outcome>\n  <price/>\n</result>"
        );
    }

    #[test]
    fn test_success_without_price_stays_absent() {
        let vars = json!({ "outcome": "success", "lead": { "id": "1" } });
        let res = feedback::response(&base_request(Some("application/json")), &vars, None);
        assert_eq!(res.body_str(), r#"{"outcome":"success","lead":{"id":"1"}}"#);
    }

    #[test]
    fn test_specified_fields_json() {
        let res = feedback::response(
            &base_request(Some("application/json")),
            &vars(),
            Some(&["outcome", "lead.id", "lead.email"]),
        );
        assert_eq!(res.status, StatusCode::Created);
        assert_eq!(
            res.body_str(),
            r#"{"outcome":"failure","lead":{"id":"123","email":"foo@bar.com"},"price":null}"#
        );
    }

    #[test]
    fn test_specified_fields_xml() {
        let res = feedback::response(&base_request(Some("text/xml")), &vars(), Some(&["outcome", "lead.id", "lead.email"]));
        assert_eq!(
            res.body_str(),
            "<?xml version=\"1.0\"?>\n<result>\n  <outcome>failure</outcome>\n  <lead>\n    <id>123</id>\n    <email>foo@bar.com</email>\n  </lead>\n  <price/>\n</result>"
        );
    }

    #[test]
    fn test_success_with_specified_fields_adds_no_price() {
        let mut vars = vars();
        vars["outcome"] = json!("success");
        let res = feedback::response(&base_request(Some("application/json")), &vars, Some(&["outcome", "lead.id"]));
        assert_eq!(res.body_str(), r#"{"outcome":"success","lead":{"id":"123"}}"#);
    }

    #[test]
    fn test_form_accept_uses_lines() {
        let res = feedback::response(
            &base_request(Some("application/x-www-form-urlencoded")),
            &vars(),
            Some(&["outcome", "reason"]),
        );
        assert_eq!(res.header("Content-Type"), Some("application/x-www-form-urlencoded"));
        assert_eq!(res.body_str(), "_______:failure\n______:bad!\n_____:");
    }
}

#[cfg(test)]
mod verbose_tests {
    use serde_json::{json, Value};

    use crate::codec::StatusCode;
    use crate::inbound::verbose;
    use crate::wire::InboundRequest;

    fn request(accept: &str) -> InboundRequest {
        InboundRequest::new("GET", "http://example.com").with_header("Accept", accept)
    }

    fn vars() -> Value {
        json!({
            "outcome": "success",
            "lead": { "id": "1234" },
            "appended": {
                "briteverify": {
                    "email": {
                        "status": "valid",
                        "disposable": "false",
                        "role_address": "false",
                        "outcome": "success"
                    }
                }
            },
            "price": 1.5
        })
    }

    #[test]
    fn test_field_list_from_appended() {
        assert_eq!(
            verbose::field_list(&vars()),
            vec![
                "appended.briteverify.email.status",
                "appended.briteverify.email.disposable",
                "appended.briteverify.email.role_address",
                "appended.briteverify.email.outcome",
                "outcome",
                "reason",
                "lead.id",
                "price",
            ]
        );
    }

    #[test]
    fn test_appended_fields_in_json() {
        let res = verbose::response(&request("application/json"), &vars());
        assert_eq!(res.status, StatusCode::Created);
        assert_eq!(
            res.body_str(),
            r#"{"appended":{"briteverify":{"email":{"status":"valid","disposable":"false","role_address":"false","outcome":"success"}}},"outcome":"success","lead":{"id":"1234"},"price":1.5}"#
        );
        assert_eq!(
            res.headers,
            vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Content-Length".to_string(), "174".to_string()),
            ]
        );
    }

    #[test]
    fn test_appended_fields_in_xml() {
        let res = verbose::response(&request("application/xml"), &vars());
        assert_eq!(
            res.body_str(),
            "<?xml version=\"1.0\"?>\n<result>\n  <appended>\n    <briteverify>\n      <email>\n        <status>valid</status>\n        <disposable>false</disposable>\n        <role_address>false</role_address>\n        <outcome>success</outcome>\n      </email>\n    </briteverify>\n  </appended>\n  <outcome>success</outcome>\n  <reason/>\n  <lead>\n    <id>1234</id>\n  </lead>\n  <price>1.5</price>\n</result>"
        );
        assert_eq!(res.header("Content-Length"), Some("380"));
    }

    #[test]
    fn test_no_appended_fields_zero_fills_price() {
        let vars = json!({ "outcome": "success", "lead": { "id": "1234" } });
        let res = verbose::response(&request("application/json"), &vars);
        assert_eq!(res.body_str(), r#"{"outcome":"success","lead":{"id":"1234"},"price":0}"#);
        assert_eq!(res.header("Content-Length"), Some("52"));
    }

    #[test]
    fn test_rich_appended_values() {
        let vars = json!({
            "outcome": "success",
            "lead": { "id": "1234" },
            "price": 1.5,
            "appended": {
                "briteverify": {
                    "email": {
                        "status": "valid",
                        "disposable": false,
                        "role_address": false,
                        "outcome": "success",
                        "billable": 1
                    }
                }
            }
        });
        let res = verbose::response(&request("application/xml"), &vars);
        assert_eq!(
            res.body_str(),
            "<?xml version=\"1.0\"?>\n<result>\n  <appended>\n    <briteverify>\n      <email>\n        <status>valid</status>\n        <disposable>false</disposable>\n        <role_address>false</role_address>\n        <outcome>success</outcome>\n        <billable>1</billable>\n      </email>\n    </briteverify>\n  </appended>\n  <outcome>success</outcome>\n  <reason/>\n  <lead>\n    <id>1234</id>\n  </lead>\n  <price>1.5</price>\n</result>"
        );
        assert_eq!(res.header("Content-Length"), Some("411"));
    }

    #[test]
    fn test_appended_arrays_stay_whole() {
        let vars = json!({ "outcome": "success", "appended": { "svc": { "codes": ["a", "b"] } } });
        let fields = verbose::field_list(&vars);
        assert_eq!(fields[0], "appended.svc.codes");
        let res = verbose::response(&request("application/json"), &vars);
        assert_eq!(
            res.body_str(),
            r#"{"appended":{"svc":{"codes":["a","b"]}},"outcome":"success","lead":{},"price":0}"#
        );
    }
}

#[cfg(test)]
mod classic_tests {
    use serde_json::{json, Value};

    use crate::codec::StatusCode;
    use crate::inbound::{classic, ClassicConfig};
    use crate::wire::InboundRequest;

    fn base_request() -> InboundRequest {
        InboundRequest::new("post", "/whatever")
            .with_header("Accept", "application/json")
            .with_header("Content-Type", "application/x-www-form-urlencoded")
            .with_body("first_name=Joe")
    }

    fn vars() -> Value {
        json!({ "lead": { "id": "123" }, "outcome": "Failure", "reason": "bad!" })
    }

    const SUCCESS_BODY: &str = r#"<!DOCTYPE response SYSTEM "https://app.leadconduit.com/dtd/response-v2-basic.dtd">
<response>
  <result>Success</result>
  <leadId>123</leadId>
  <url>
    <![CDATA[https://app.leadconduit.com/leads?id=123]]>
  </url>
  <price>1.5</price>
</response>"#;

    const NON_SUCCESS_BODY: &str = r#"<!DOCTYPE response SYSTEM "https://app.leadconduit.com/dtd/response-v2-basic.dtd">
<response>
  <result>Failure</result>
  <reason>bad!</reason>
  <leadId>123</leadId>
  <url>
    <![CDATA[https://app.leadconduit.com/leads?id=123]]>
  </url>
  <price/>
</response>"#;

    #[test]
    fn test_responds_with_201_xml() {
        let res = classic::response(&base_request(), &vars());
        assert_eq!(res.status, StatusCode::Created);
        assert_eq!(
            res.headers,
            vec![
                ("Content-Type".to_string(), "application/xml".to_string()),
                ("Content-Length".to_string(), "264".to_string()),
            ]
        );
    }

    #[test]
    fn test_failure_outcome() {
        let res = classic::response(&base_request(), &vars());
        assert_eq!(res.body_str(), NON_SUCCESS_BODY);
    }

    #[test]
    fn test_success_outcome_with_price() {
        let mut vars = vars();
        vars["outcome"] = json!("Success");
        vars["price"] = json!(1.5);
        vars.as_object_mut().unwrap().remove("reason");
        let res = classic::response(&base_request(), &vars);
        assert_eq!(res.body_str(), SUCCESS_BODY);
    }

    #[test]
    fn test_failure_refunds_case_insensitively() {
        let mut vars = vars();
        vars["price"] = json!(2);
        let res = classic::response(&base_request(), &vars);
        assert!(res.body_str().contains("  <price>-2</price>\n"));
    }

    #[test]
    fn test_custom_config() {
        let config = ClassicConfig {
            lead_url_base: "https://leads.example.com/".to_string(),
            dtd_url: "https://leads.example.com/response.dtd".to_string(),
        };
        let res = classic::response_with(&config, &vars());
        let body = res.body_str();
        assert!(body.starts_with(r#"<!DOCTYPE response SYSTEM "https://leads.example.com/response.dtd">"#));
        assert!(body.contains("<![CDATA[https://leads.example.com/123]]>"));
    }
}

#[cfg(test)]
mod policy_tests {
    use serde_json::json;

    use crate::codec::{Projection, Slot};
    use crate::inbound::{refund, PricePolicy};

    #[test]
    fn test_refund() {
        assert_eq!(refund(&json!(1.5)), json!(-1.5));
        assert_eq!(refund(&json!(-3)), json!(-3));
        assert_eq!(refund(&json!(0)), json!(0));
        assert_eq!(refund(&json!("2.25")), json!(-2.25));
        assert_eq!(refund(&json!("abc")), json!(null));
        assert_eq!(refund(&json!(4.0)), json!(-4));
    }

    #[test]
    fn test_failure_matching() {
        let failure = json!("failure");
        let capital = json!("Failure");
        assert!(PricePolicy::FEEDBACK.is_failure(Some(&failure)));
        assert!(!PricePolicy::FEEDBACK.is_failure(Some(&capital)));
        assert!(PricePolicy::CLASSIC.is_failure(Some(&capital)));
        assert!(!PricePolicy::CLASSIC.is_failure(None));
    }

    #[test]
    fn test_apply_only_touches_requested_price() {
        let vars = json!({ "outcome": "failure" });
        let mut projection = Projection::project(&vars, &["outcome"]);
        PricePolicy::VERBOSE.apply(&mut projection);
        assert!(!projection.contains("price"));

        let mut projection = Projection::project(&vars, &["outcome", "price"]);
        PricePolicy::VERBOSE.apply(&mut projection);
        assert_eq!(projection.get("price"), Some(&Slot::Value(json!(0))));

        let mut projection = Projection::project(&vars, &["outcome", "price"]);
        PricePolicy::CLASSIC.apply(&mut projection);
        assert_eq!(projection.get("price"), Some(&Slot::Missing));
    }

    #[test]
    fn test_feedback_refunds_unrequested_price() {
        let vars = json!({ "outcome": "failure", "price": 3 });
        let mut projection = Projection::project(&vars, &["outcome"]);
        PricePolicy::FEEDBACK.apply(&mut projection);
        assert_eq!(projection.get("price"), Some(&Slot::Value(json!(null))));
        assert_eq!(projection.to_json().to_string(), r#"{"outcome":"failure","price":null}"#);

        let vars = json!({ "outcome": "success" });
        let mut projection = Projection::project(&vars, &["outcome"]);
        PricePolicy::FEEDBACK.apply(&mut projection);
        assert!(!projection.contains("price"));
    }
}

#[cfg(test)]
mod adapter_tests {
    use serde_json::json;

    use crate::codec::StatusCode;
    use crate::inbound::{find_adapter, InboundAdapter, Feedback, ADAPTERS, FEEDBACK_REQUEST};
    use crate::wire::InboundRequest;

    #[test]
    fn test_adapter_names() {
        let names: Vec<&str> = ADAPTERS.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["Standard Classic", "Standard Feedback", "Standard Verbose"]);
        assert_eq!(find_adapter("standard verbose").map(|a| a.name()), Some("Standard Verbose"));
        assert!(find_adapter("To Flow").is_none());
    }

    #[test]
    fn test_handle_round_trip() {
        let request = InboundRequest::new("GET", "/feedback?lead.id=77&type=return")
            .with_header("Accept", "application/json");
        let res = Feedback.handle(&request, &|mut vars| {
            vars["outcome"] = json!("success");
            vars
        });
        assert_eq!(res.status, StatusCode::Created);
        assert_eq!(res.body_str(), r#"{"outcome":"success","lead":{"id":"77"}}"#);
    }

    #[test]
    fn test_handle_renders_rejections() {
        let request = InboundRequest::new("PUT", "/feedback");
        let res = Feedback.handle(&request, &|vars| vars);
        assert_eq!(res.status, StatusCode::UnsupportedMediaType);
        assert_eq!(res.body_str(), "The PUT method is not allowed");
    }

    #[test]
    fn test_variables_serialize_for_documentation() {
        let doc = serde_json::to_value(&FEEDBACK_REQUEST[0]).unwrap();
        assert_eq!(
            doc,
            json!({
                "name": "type",
                "type": "string",
                "label": "Feedback type",
                "description": "The type of feedback being given",
                "examples": ["return", "conversion"]
            })
        );
        let price = Feedback.response_variables().iter().find(|v| v.name == "price").unwrap();
        assert_eq!(serde_json::to_value(price).unwrap(), json!({
            "name": "price",
            "type": "number",
            "description": "The price of the lead"
        }));
    }
}
