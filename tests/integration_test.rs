//! Integration tests for the postback tracking flow.
//!
//! These tests run the full session exchange (cookie bootstrap, form load,
//! form submission) against `httptest` mock servers. They do not make real
//! network requests.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httptest::{all_of, matchers::*, responders::*, Expectation, Server};
    use post_tracker::{Backend, Config, ErrorType, Tracker};

    const SESSION_COOKIE: &str = "ASP.NET_SessionId=abc123";

    const FORM_PAGE: &str = r#"<html><body>
        <form method="post" action="./track.aspx" id="form1">
            <input type="hidden" name="__EVENTTARGET" value="" />
            <input type="hidden" name="__EVENTARGUMENT" value="" />
            <input type="hidden" name="__VIEWSTATE" value="/wEPDwUKMTY3+Nz==" />
            <input type="hidden" name="__VIEWSTATEGENERATOR" value="CA0B0334" />
            <input type="hidden" name="__EVENTVALIDATION" value="/wEdAAM&amp;x" />
            <input type="text" name="ctl00$ContentPlaceHolder1$txtItemId" id="ContentPlaceHolder1_txtItemId" />
            <button type="button" onclick="__doPostBack('ctl00$ContentPlaceHolder1$btnSearch','')">Search</button>
        </form>
    </body></html>"#;

    const BUTTON_FORM_PAGE: &str = r#"<html><body>
        <form method="post">
            <input type="hidden" name="__VIEWSTATE" value="vs" />
            <input type="text" name="txtConsignment" />
            <input type="submit" name="btnTrack" value="Track Article" />
        </form>
    </body></html>"#;

    const RESULT_PAGE: &str = r#"<html><body>
        <table id="example">
            <tr><th>Article Type</th><th>Origin</th><th>Destination</th><th>Booking Date</th></tr>
            <tr><td>Letter Post</td><td>India</td><td>Canada</td><td>08-01-2026</td></tr>
        </table>
        <span id="ContentPlaceHolder1_DeliveryLabel">Delivered on 16-01-2026 11:05:00</span>
        <table id="ContentPlaceHolder1_gvTrackDetails">
            <tr><th>Date</th><th>Time</th><th>Office</th><th>Event</th><th>Location</th></tr>
            <tr><td>16-01-2026</td><td>11:05:00</td><td>TORONTO</td><td>Item Delivered</td><td>Toronto</td></tr>
            <tr><td>11-01-2026</td><td>07:27:00</td><td>DIMC NEW DELHI</td><td>Aircraft take off</td><td>Flight - AI0187 (DEL to YYZ)</td></tr>
            <tr><td>08-01-2026</td><td>10:00:00</td><td>NEW DELHI GPO</td><td>Item Booked</td><td>New Delhi</td></tr>
        </table>
    </body></html>"#;

    fn test_config(backends: Vec<Backend>) -> Config {
        Config {
            timeout_seconds: 5,
            politeness_delay: Duration::ZERO,
            backends,
            ..Default::default()
        }
    }

    fn backend_for(name: &str, server: &Server) -> Backend {
        Backend {
            name: name.to_string(),
            base_url: server.url_str("/"),
            tracking_url: server.url_str("/track.aspx"),
        }
    }

    fn expect_session(server: &Server) {
        server.expect(
            Expectation::matching(request::method_path("GET", "/")).respond_with(
                status_code(200)
                    .append_header("Set-Cookie", format!("{}; path=/; HttpOnly", SESSION_COOKIE))
                    .body("<html><body>Welcome</body></html>"),
            ),
        );
    }

    #[tokio::test]
    async fn test_postback_flow_replays_cookies_and_hidden_state() {
        let server = Server::run();
        expect_session(&server);
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/track.aspx"),
                request::headers(contains(("cookie", SESSION_COOKIE))),
            ])
            .respond_with(status_code(200).body(FORM_PAGE)),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/track.aspx"),
                request::headers(contains(("cookie", SESSION_COOKIE))),
                request::body(url_decoded(contains(("__VIEWSTATE", "/wEPDwUKMTY3+Nz==")))),
                request::body(url_decoded(contains(("__VIEWSTATEGENERATOR", "CA0B0334")))),
                request::body(url_decoded(contains(("__EVENTVALIDATION", "/wEdAAM&x")))),
                request::body(url_decoded(contains((
                    "ctl00$ContentPlaceHolder1$txtItemId",
                    "LP951627598IN"
                )))),
                request::body(url_decoded(contains((
                    "__EVENTTARGET",
                    "ctl00$ContentPlaceHolder1$btnSearch"
                )))),
                request::body(url_decoded(contains(("__EVENTARGUMENT", "")))),
            ])
            .respond_with(status_code(200).body(RESULT_PAGE)),
        );

        let tracker = Tracker::new(test_config(vec![backend_for("Mock", &server)]));
        let result = tracker.track("lp951627598in", false).await;

        assert_eq!(result.error, None);
        assert_eq!(result.tracking_number, "LP951627598IN");
        assert_eq!(result.source.as_deref(), Some("Mock"));
        assert_eq!(result.status, "Delivered");
        assert_eq!(result.events.len(), 3);
        assert_eq!(result.events[1].office, "DIMC NEW DELHI");
        assert_eq!(
            result.events[1].location.as_deref(),
            Some("Flight - AI0187 (DEL to YYZ)")
        );
        assert_eq!(result.origin.as_deref(), Some("India"));
        assert_eq!(result.destination.as_deref(), Some("Canada"));
        assert_eq!(result.booked_on.as_deref(), Some("08-01-2026"));
        assert_eq!(result.delivered_on.as_deref(), Some("16-01-2026 11:05:00"));
        assert_eq!(result.article_type.as_deref(), Some("Letter Post"));
        assert_eq!(tracker.stats().successes(), 1);
    }

    #[tokio::test]
    async fn test_button_submission_without_postback_handler() {
        let server = Server::run();
        expect_session(&server);
        server.expect(
            Expectation::matching(request::method_path("GET", "/track.aspx"))
                .respond_with(status_code(200).body(BUTTON_FORM_PAGE)),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/track.aspx"),
                request::body(url_decoded(contains(("txtConsignment", "EE123456789IN")))),
                request::body(url_decoded(contains(("btnTrack", "Track Article")))),
                request::body(url_decoded(not(contains(key("__EVENTTARGET"))))),
            ])
            .respond_with(status_code(200).body("<html><body>No records</body></html>")),
        );

        let tracker = Tracker::new(test_config(vec![backend_for("Mock", &server)]));
        let result = tracker.track("EE123456789IN", false).await;

        assert!(result.is_success());
        assert!(result.events.is_empty());
        assert_eq!(result.status, "No tracking information available");
    }

    #[tokio::test]
    async fn test_expired_form_state_is_protocol_error() {
        let server = Server::run();
        expect_session(&server);
        server.expect(
            Expectation::matching(request::method_path("GET", "/track.aspx")).respond_with(
                status_code(200).body("<html><body>Your session has expired.</body></html>"),
            ),
        );

        let tracker = Tracker::new(test_config(vec![backend_for("Mock", &server)]));
        let result = tracker.track("LP951627598IN", false).await;

        assert_eq!(result.status, "Error");
        assert!(result.events.is_empty());
        assert_eq!(result.source.as_deref(), Some("none"));
        let error = result.error.expect("error message");
        assert!(error.starts_with("Could not retrieve tracking information."));
        assert!(error.ends_with(
            "Last error: Could not extract form state from Mock. Session may have expired."
        ));
        assert_eq!(tracker.stats().get_error_count(ErrorType::Protocol), 1);
    }

    #[tokio::test]
    async fn test_http_error_on_submit() {
        let server = Server::run();
        expect_session(&server);
        server.expect(
            Expectation::matching(request::method_path("GET", "/track.aspx"))
                .respond_with(status_code(200).body(FORM_PAGE)),
        );
        server.expect(
            Expectation::matching(request::method_path("POST", "/track.aspx"))
                .respond_with(status_code(500)),
        );

        let tracker = Tracker::new(test_config(vec![backend_for("Mock", &server)]));
        let result = tracker.track("LP951627598IN", false).await;

        let error = result.error.expect("error message");
        assert!(error.contains("Error from Mock: 500 Internal Server Error"));
        assert_eq!(tracker.stats().get_error_count(ErrorType::RemoteStatus), 1);
    }

    #[tokio::test]
    async fn test_error_notice_on_result_page() {
        let server = Server::run();
        expect_session(&server);
        server.expect(
            Expectation::matching(request::method_path("GET", "/track.aspx"))
                .respond_with(status_code(200).body(FORM_PAGE)),
        );
        server.expect(
            Expectation::matching(request::method_path("POST", "/track.aspx")).respond_with(
                status_code(200)
                    .body(r#"<html><body><span class="lblError">Invalid Article Number</span></body></html>"#),
            ),
        );

        let tracker = Tracker::new(test_config(vec![backend_for("Mock", &server)]));
        let result = tracker.track("LP951627598IN", false).await;

        let error = result.error.expect("error message");
        assert!(error.ends_with("Last error: Error from Mock: Invalid Article Number"));
        assert_eq!(tracker.stats().get_error_count(ErrorType::RemoteMessage), 1);
    }

    #[tokio::test]
    async fn test_falls_through_to_next_backend() {
        let broken = Server::run();
        broken.expect(
            Expectation::matching(request::method_path("GET", "/")).respond_with(status_code(503)),
        );

        let healthy = Server::run();
        expect_session(&healthy);
        healthy.expect(
            Expectation::matching(request::method_path("GET", "/track.aspx"))
                .respond_with(status_code(200).body(FORM_PAGE)),
        );
        healthy.expect(
            Expectation::matching(request::method_path("POST", "/track.aspx"))
                .respond_with(status_code(200).body(RESULT_PAGE)),
        );

        let tracker = Tracker::new(test_config(vec![
            backend_for("Primary", &broken),
            backend_for("Secondary", &healthy),
        ]));
        let result = tracker.track("LP951627598IN", false).await;

        assert!(result.is_success());
        assert_eq!(result.source.as_deref(), Some("Secondary"));
        assert_eq!(tracker.stats().get_error_count(ErrorType::Session), 1);
        assert_eq!(tracker.stats().successes(), 1);
    }

    #[tokio::test]
    async fn test_slow_form_page_times_out() {
        let server = Server::run();
        expect_session(&server);
        server.expect(
            Expectation::matching(request::method_path("GET", "/track.aspx")).respond_with(
                delay_and_then(Duration::from_secs(3), status_code(200).body(FORM_PAGE)),
            ),
        );

        let mut config = test_config(vec![backend_for("Slow", &server)]);
        config.timeout_seconds = 1;
        let tracker = Tracker::new(config);
        let result = tracker.track("LP951627598IN", false).await;

        let error = result.error.expect("error message");
        assert!(error.ends_with("Last error: Request to Slow timed out."));
        assert_eq!(tracker.stats().get_error_count(ErrorType::Timeout), 1);
    }

    #[tokio::test]
    async fn test_batch_lookups_are_bounded() {
        let server = Server::run();
        let numbers: Vec<String> = (0..20).map(|i| format!("LP{:09}IN", i)).collect();
        server.expect(
            Expectation::matching(request::method_path("GET", "/"))
                .times(numbers.len())
                .respond_with(delay_and_then(
                    Duration::from_millis(400),
                    status_code(503),
                )),
        );

        let tracker = Tracker::new(test_config(vec![backend_for("Slow", &server)]));
        let started = std::time::Instant::now();
        let results = tracker.track_batch(numbers.clone(), false).await;

        // 20 lookups through a window of 10 take at least two rounds
        assert!(started.elapsed() >= Duration::from_millis(800));
        assert_eq!(results.len(), numbers.len());
        assert!(results.iter().all(|r| !r.is_success()));
        assert_eq!(results[19].tracking_number, numbers[19]);
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        // Port 9 (discard) on localhost is closed in test environments.
        let tracker = Tracker::new(test_config(vec![Backend {
            name: "Dead".to_string(),
            base_url: "http://127.0.0.1:9/".to_string(),
            tracking_url: "http://127.0.0.1:9/track.aspx".to_string(),
        }]));
        let result = tracker.track("LP951627598IN", false).await;

        assert_eq!(result.source.as_deref(), Some("none"));
        let error = result.error.expect("error message");
        assert!(error.contains("Last error: Could not establish session with Dead"));
    }

    #[tokio::test]
    async fn test_invalid_number_never_hits_network() {
        // The server has no expectations; any request would fail the test on drop.
        let server = Server::run();
        let tracker = Tracker::new(test_config(vec![backend_for("Mock", &server)]));

        let result = tracker.track("bad", false).await;
        assert_eq!(result.status, "Error");
        assert!(result.events.is_empty());
        assert!(result
            .error
            .as_deref()
            .is_some_and(|e| e.starts_with("Invalid tracking number format.")));
    }

    #[tokio::test]
    async fn test_bulk_demo_lookup_preserves_order() {
        let tracker = Tracker::new(test_config(Vec::new()));
        let numbers = vec![
            "LP951627598IN".to_string(),
            "LP951629165IN".to_string(),
            "invalid".to_string(),
        ];
        let results = tracker.track_batch(numbers, true).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].tracking_number, "LP951627598IN");
        assert_eq!(results[1].tracking_number, "LP951629165IN");
        assert_eq!(results[0].events, results[1].events);
        assert!(!results[2].is_success());
    }
}
