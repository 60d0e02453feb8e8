pub enum Cluster {
    Mainnet,
    Devnet,
}

impl Cluster {
    pub fn from_config(cluster_name: &str) -> Self {
        match cluster_name {
            "mainnet-beta" | "mainnet" => Cluster::Mainnet,
            _ => Cluster::Devnet,
        }
    }

    pub fn explorer_suffix(&self) -> &'static str {
        match self {
            Cluster::Mainnet => "",
            Cluster::Devnet => "?cluster=devnet",
        }
    }
}

impl std::fmt::Display for Cluster {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Cluster::Mainnet => "mainnet",
            Cluster::Devnet => "devnet",
        };
        write!(f, "{}", s)
    }
}
