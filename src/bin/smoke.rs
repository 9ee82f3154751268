// src/bin/smoke.rs
// Terminal client exercising a running placelens server end to end:
// sign in, classify every image in a directory, print the history.
use dotenv::dotenv;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

// --- ANSI colors ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "bmp"];

// --- Wire types ---

#[derive(Serialize)]
struct SignInPayload<'a> {
    social_type: &'a str,
    social_id: &'a str,
    nickname: &'a str,
}

#[derive(Deserialize, Debug)]
struct SignInResponse {
    token: String,
    user_id: i64,
    nickname: String,
}

#[derive(Deserialize, Debug)]
struct Prediction {
    name: String,
    sentence: String,
}

#[derive(Deserialize, Debug)]
struct HistoryItem {
    history_id: i64,
    place_name: String,
    image: String,
    created_at: String,
}

#[derive(Deserialize, Debug, Default)]
struct HistoryResponse {
    #[serde(default)]
    histories: Vec<HistoryItem>,
}

#[derive(Debug)]
struct UploadResult {
    file: String,
    prediction: Result<Prediction, String>,
    duration_secs: f64,
}

// --- Client ---

struct SmokeClient {
    base_url: String,
    client: Client,
    token: Option<String>,
    results: Vec<UploadResult>,
}

impl SmokeClient {
    fn new(base_url: String) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: None,
            results: Vec::new(),
        })
    }

    async fn check_service_health(&self) -> bool {
        match self.client.get(format!("{}/health", self.base_url)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn sign_in(&mut self, social_id: &str, nickname: &str) -> Result<SignInResponse, String> {
        let payload = SignInPayload {
            social_type: "kakao",
            social_id,
            nickname,
        };

        let response = self
            .client
            .post(format!("{}/users/signin", self.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let signed_in = Self::parse::<SignInResponse>(response).await?;
        self.token = Some(signed_in.token.clone());
        Ok(signed_in)
    }

    async fn classify(&self, path: &Path) -> Result<Prediction, String> {
        let bytes = tokio::fs::read(path).await.map_err(|e| e.to_string())?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        let form = Form::new().part("image", Part::bytes(bytes).file_name(file_name));

        let mut request = self
            .client
            .post(format!("{}/place/classification", self.base_url))
            .multipart(form);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| e.to_string())?;
        Self::parse::<Prediction>(response).await
    }

    async fn history(&self) -> Result<HistoryResponse, String> {
        let mut request = self.client.get(format!("{}/place/history", self.base_url));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(|e| e.to_string())?;
        Self::parse::<HistoryResponse>(response).await
    }

    async fn parse<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T, String> {
        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| format!("Failed to parse response JSON: {}", e))
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(format!("HTTP {} - {}", status, body))
        }
    }

    async fn run(&mut self, images: Vec<PathBuf>, social_id: &str, nickname: &str) {
        println!("\n{}🔍 Checking service status...{}", CYAN, RESET);
        if !self.check_service_health().await {
            println!("{}❌ Service unavailable at {}{}", RED, self.base_url, RESET);
            process::exit(1);
        }
        println!("{}✅ Service available{}\n", GREEN, RESET);

        match self.sign_in(social_id, nickname).await {
            Ok(user) => println!(
                "{}👤 Signed in as {} (user {}){}",
                GREEN, user.nickname, user.user_id, RESET
            ),
            Err(e) => {
                println!("{}⚠️  Sign-in failed, uploading anonymously: {}{}", YELLOW, e, RESET);
            }
        }

        println!("\n{}🚀 Classifying {} images...{}\n", BOLD, images.len(), RESET);

        let total = images.len();
        for (i, path) in images.iter().enumerate() {
            let file = path.display().to_string();
            let start_time = Instant::now();
            let prediction = self.classify(path).await;
            let duration = start_time.elapsed().as_secs_f64();

            match &prediction {
                Ok(p) => println!(
                    "{}[{}/{}] {} → {}{} ({:.2}s)\n      {}",
                    GREEN, i + 1, total, file, p.name, RESET, duration, p.sentence
                ),
                Err(e) => println!("{}[{}/{}] {} ❌ {}{}", RED, i + 1, total, file, e, RESET),
            }

            self.results.push(UploadResult {
                file,
                prediction,
                duration_secs: duration,
            });
        }

        self.print_summary();

        if self.token.is_some() {
            match self.history().await {
                Ok(history) => self.print_history(&history),
                Err(e) => println!("{}❌ Failed to fetch history: {}{}", RED, e, RESET),
            }
        }
    }

    fn print_summary(&self) {
        println!("\n\n{}📋 Classification Summary{}", BOLD, RESET);
        println!("──────────────────────────────────────────────────────────────────────────────");
        println!("{:<44} {:<24} {:>9}", "File", "Category", "Duration");
        println!("──────────────────────────────────────────────────────────────────────────────");

        let mut succeeded = 0;
        let mut total_duration = 0.0;
        for res in &self.results {
            let category = match &res.prediction {
                Ok(p) => {
                    succeeded += 1;
                    p.name.clone()
                }
                Err(_) => "❌".to_string(),
            };
            total_duration += res.duration_secs;
            println!("{:<44} {:<24} {:>8.2}s", res.file, category, res.duration_secs);
        }

        println!("──────────────────────────────────────────────────────────────────────────────");
        println!(
            "  • Classified: {}{}{} / {}",
            GREEN,
            succeeded,
            RESET,
            self.results.len()
        );
        println!("  • Total Duration: {:.1}s", total_duration);
    }

    fn print_history(&self, history: &HistoryResponse) {
        println!("\n{}🗂️  History ({} records){}", BOLD, history.histories.len(), RESET);
        for item in &history.histories {
            println!(
                "  #{:<6} {:<24} {}  {}",
                item.history_id, item.place_name, item.created_at, item.image
            );
        }
    }
}

fn collect_images(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut images: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    images.sort();
    Ok(images)
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let base_url = env::var("PLACELENS_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
    let images_dir = env::args()
        .nth(1)
        .or_else(|| env::var("SMOKE_IMAGES_DIR").ok())
        .unwrap_or_else(|| "samples".to_string());
    let social_id = env::var("SMOKE_SOCIAL_ID").unwrap_or_else(|_| "smoke-test".to_string());
    let nickname = env::var("SMOKE_NICKNAME").unwrap_or_else(|_| "smoke".to_string());

    let images = match collect_images(Path::new(&images_dir)) {
        Ok(images) if !images.is_empty() => images,
        Ok(_) => {
            println!("{}⚠️  No images found in {}{}", YELLOW, images_dir, RESET);
            process::exit(1);
        }
        Err(e) => {
            println!("{}❌ Cannot read {}: {}{}", RED, images_dir, e, RESET);
            process::exit(1);
        }
    };

    let mut client = match SmokeClient::new(base_url) {
        Ok(client) => client,
        Err(e) => {
            println!("{}❌ Failed to create HTTP client: {}{}", RED, e, RESET);
            process::exit(1);
        }
    };
    client.run(images, &social_id, &nickname).await;
}
