//! Scenario tests for the client facade.
//!
//! Every scenario runs against the in-memory ledger and gateway in
//! `crate::mock`, so rule rejections travel the same path they do in
//! production: program log line, error translation, typed error.


use std::sync::Arc;

use serde_json::{json, Value};
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use xnft_core::config::ClientConfig;
use xnft_core::constants::XNFT_PROGRAM_ID;
use xnft_core::model::{CreateXnftParams, XnftRecord};

use crate::client::XnftClient;
use crate::mock::{MockGateway, MockLedger};

pub(crate) struct Harness {
    pub ledger: Arc<MockLedger>,
    pub gateway: Arc<MockGateway>,
    pub config: ClientConfig,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            ledger: Arc::new(MockLedger::new(XNFT_PROGRAM_ID)),
            gateway: Arc::new(MockGateway::default()),
            config: ClientConfig::default(),
        }
    }

    pub fn wallet() -> Arc<Keypair> {
        Arc::new(Keypair::new())
    }

    pub fn client(&self, signer: &Arc<Keypair>) -> XnftClient {
        XnftClient::new(
            self.config.clone(),
            self.ledger.clone(),
            self.gateway.clone(),
            signer.clone(),
        )
        .unwrap()
    }

    pub fn read_only(&self) -> XnftClient {
        XnftClient::read_only(self.config.clone(), self.ledger.clone(), self.gateway.clone())
            .unwrap()
    }

    /// Serve `doc` for `uri` at the url the configured gateways rewrite it to.
    pub fn host(&self, uri: &str, doc: Value) {
        self.gateway.put(self.config.gateways.rewrite(uri), doc);
    }

    /// Publish an App xNFT with a hosted document. Returns its address.
    pub async fn publish(&self, publisher: &Arc<Keypair>, name: &str) -> Pubkey {
        self.publish_with(publisher, name, |_| {}).await
    }

    pub async fn publish_with(
        &self,
        publisher: &Arc<Keypair>,
        name: &str,
        tweak: impl FnOnce(&mut CreateXnftParams),
    ) -> Pubkey {
        let uri = format!("ipfs://{name}");
        self.host(&uri, json!({ "name": name, "description": format!("{name} app") }));

        let mut params = CreateXnftParams::new(publisher.pubkey(), uri);
        tweak(&mut params);
        let (_, xnft) = self
            .client(publisher)
            .create_app_xnft(name, params)
            .await
            .unwrap();
        xnft
    }

    pub fn record(&self, xnft: &Pubkey) -> XnftRecord {
        self.ledger.record(xnft).unwrap()
    }
}
