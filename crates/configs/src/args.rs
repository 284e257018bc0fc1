use clap::Parser;
use serde::Serialize;

/// Command-line arguments the backend process was launched with.
#[derive(Debug, Clone, PartialEq, Serialize, Parser)]
#[command(name = "backend")]
#[command(about = "Model-serving backend state bootstrap")]
#[command(version)]
pub struct LaunchArgs {
    /// Port to listen on
    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    /// Host to bind; use 0.0.0.0 to allow external access
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Serve the bundled web UI
    #[arg(long)]
    pub webui: bool,

    /// Use the beta inference kernels
    #[arg(long)]
    pub rwkv_beta: bool,

    /// Run the model through the rwkv.cpp backend
    #[arg(long)]
    pub rwkv_cpp: bool,

    /// Run the model through the WebGPU backend
    #[arg(long)]
    pub webgpu: bool,

    /// Path to the TOML config file (overrides CONFIG_PATH)
    #[arg(long)]
    pub config: Option<String>,
}

impl Default for LaunchArgs {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "127.0.0.1".into(),
            webui: false,
            rwkv_beta: false,
            rwkv_cpp: false,
            webgpu: false,
            config: None,
        }
    }
}

impl LaunchArgs {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn external_access(&self) -> bool {
        self.host == "0.0.0.0"
    }
}
