// src/reader/mod.rs

use anyhow::Result;
use reqwest::Client;
use tracing::info;
use url::Url;

use crate::config::Config;
use crate::fetch::{self, Params};
use crate::parse::parse_response_text;
use crate::response::StatsResponse;

pub mod data;
pub mod list;

pub use data::StatsDataReader;
pub use list::StatsListReader;

/// One e-Stat endpoint: where it lives, what it is sent, and which tag opens
/// its table section.
#[allow(async_fn_in_trait)]
pub trait Reader {
    /// Path segment after `/app/`, e.g. `getSimpleStatsList`.
    const QUERY: &'static str;
    /// Quoted line that precedes the table in the response body.
    const TABLE_TAG: &'static str;

    fn config(&self) -> &Config;

    /// Endpoint-specific parameters; `appId` and `lang` are added by [`Reader::build_params`].
    fn query_params(&self) -> Params;

    fn build_url(&self) -> Result<Url> {
        let cfg = self.config();
        fetch::build_url(&cfg.base_url, &cfg.version, Self::QUERY)
    }

    fn build_params(&self) -> Params {
        let cfg = self.config();
        let mut params = vec![("appId".to_string(), cfg.app_id.clone())];
        if let Some(lang) = &cfg.lang {
            params.push(("lang".to_string(), lang.clone()));
        }
        params.extend(self.query_params());
        params
    }

    async fn read(&self, client: &Client) -> Result<StatsResponse> {
        let url = self.build_url()?;
        let params = self.build_params();
        let text = fetch::get_text(client, &url, &params).await?;
        let resp = StatsResponse::from(parse_response_text(&text, Self::TABLE_TAG));
        info!(
            query = Self::QUERY,
            status = resp.status().unwrap_or("-"),
            has_table = resp.has_table(),
            "read response"
        );
        Ok(resp)
    }
}

/// Push `name=value` only when `value` is set.
pub(crate) fn push_opt<T: ToString>(params: &mut Params, name: &str, value: Option<T>) {
    if let Some(v) = value {
        params.push((name.to_string(), v.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one HTTP response with `status` and `body`, returning the base URL
    /// and a handle yielding the raw request.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = sock.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            sock.write_all(response.as_bytes()).await.unwrap();
            sock.shutdown().await.ok();
            request
        });
        (format!("http://{}", addr), handle)
    }

    fn config(base_url: String) -> Config {
        Config {
            app_id: "test-app".into(),
            base_url,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn data_reader_round_trip() {
        let body = "\"RESULT\"\r\n\"STATUS\",\"0\"\r\n\"DATE\",\"2020-01-15T10:30:00.000+09:00\"\r\n\"VALUE\"\r\n\"time_code\",\"value\"\r\n\"2019000000\",\"126167\"\r\n";
        let (base, server) = serve_once("200 OK", body).await;
        let reader = StatsDataReader::new(config(base), "0003411595").limit(1);

        let resp = reader.read(&Client::new()).await.unwrap();
        assert_eq!(resp.status(), Some("0"));
        assert_eq!(
            resp.table().unwrap(),
            "\"time_code\",\"value\"\n\"2019000000\",\"126167\""
        );

        let request = server.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(
            request_line.starts_with("GET /rest/3.0/app/getSimpleStatsData?"),
            "{}",
            request_line
        );
        assert!(request_line.contains("appId=test-app"));
        assert!(request_line.contains("statsDataId=0003411595"));
        assert!(request_line.contains("limit=1"));
    }

    #[tokio::test]
    async fn list_reader_splits_on_table_inf() {
        let body = "\"RESULT\"\n\"STATUS\",\"0\"\n\"DATE\",\"2020-01-15T10:30:00.000+09:00\"\n\"RESULT_INF\"\n\"FROM_NUMBER\",\"1\"\n\"TO_NUMBER\",\"2\"\n\"TABLE_INF\"\n\"@id\",\"STAT_CODE\",\"STAT_NAME\"\n\"0003411595\",\"00200521\",\"国勢調査\"\n\"0003411596\",\"00200521\",\"国勢調査\"\n";
        let (base, server) = serve_once("200 OK", body).await;
        let reader = StatsListReader::new(config(base))
            .stats_code("00200521")
            .limit(2);

        let resp = reader.read(&Client::new()).await.unwrap();
        assert_eq!(resp.status(), Some("0"));
        assert_eq!(resp.get("TO_NUMBER"), Some("2"));
        assert_eq!(
            resp.table().unwrap(),
            "\"@id\",\"STAT_CODE\",\"STAT_NAME\"\n\"0003411595\",\"00200521\",\"国勢調査\"\n\"0003411596\",\"00200521\",\"国勢調査\""
        );

        let request = server.await.unwrap();
        assert!(request.contains("/rest/3.0/app/getSimpleStatsList?"));
        assert!(request.contains("limit=2"));
    }

    #[tokio::test]
    async fn list_reader_without_table_is_ok() {
        let body = "\"STATUS\",\"1\"\n\"ERROR_MSG\",\"正常に終了しましたが、該当データはありませんでした。\"\n";
        let (base, server) = serve_once("200 OK", body).await;
        let reader = StatsListReader::new(config(base)).stats_code("00200521");

        let resp = reader.read(&Client::new()).await.unwrap();
        assert_eq!(resp.status(), Some("1"));
        assert!(!resp.has_table());
        assert!(resp.table().is_err());

        let request = server.await.unwrap();
        assert!(request.contains("/rest/3.0/app/getSimpleStatsList?"));
        assert!(request.contains("statsCode=00200521"));
    }

    #[tokio::test]
    async fn server_error_is_a_transport_error() {
        let (base, server) = serve_once("500 Internal Server Error", "oops").await;
        let reader = StatsListReader::new(config(base));

        let err = reader.read(&Client::new()).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Non-success status"), "{:#}", err);
        server.await.unwrap();
    }

    #[test]
    fn app_id_and_lang_lead_the_params() {
        let cfg = Config {
            lang: Some("E".into()),
            ..config("https://api.e-stat.go.jp".into())
        };
        let params = StatsListReader::new(cfg).build_params();
        assert_eq!(params[0], ("appId".to_string(), "test-app".to_string()));
        assert_eq!(params[1], ("lang".to_string(), "E".to_string()));
    }
}
