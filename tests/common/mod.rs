//! Shared fixtures for the integration tests

#![allow(dead_code)]

use bson::oid::ObjectId;
use bson::{Bson, Document, doc};
use std::sync::Once;

pub const ORG_HEX: &str = "507f191e810c19729de860ea";
pub const OTHER_ORG_HEX: &str = "65a1b2c3d4e5f60718293a4b";
pub const QUERY_HEX: &str = "6601f0c2a9b8e7d6c5b4a392";
pub const LLMS_HEX: &str = "66aa00bb11cc22dd33ee44ff";

static TRACING: Once = Once::new();

/// Route converter logs to the test writer; `RUST_LOG` controls the level
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn oid(hex: &str) -> ObjectId {
    ObjectId::parse_str(hex).expect("fixture ids are valid")
}

pub fn millis(ms: i64) -> bson::DateTime {
    bson::DateTime::from_millis(ms)
}

/// An organisation with every field populated, credentials included
pub fn full_organisation(hex: &str) -> Document {
    doc! {
        "_id": oid(hex),
        "country": "GB",
        "contactEmail": "owner@acme.com",
        "locale": "en",
        "reviewed": true,
        "rating": 4.5,
        "plan": "basic",
        "website": "https://acme.com",
        "settingsLastSynced": millis(1_700_000_100_000),
        "createdAt": millis(1_700_000_000_000),
        "shopifyConnection": {
            "apiKey": "shpat_secret",
            "domain": "acme.myshopify.com",
            "scopes": "read_products,read_content",
        },
        "shopifyConnectionStatus": "ACTIVE",
        "name": "Acme",
        "socialMediaScan": {
            "status": "SUCCESS",
            "details": "all found",
            "updatedAt": millis(1_700_000_200_000),
        },
        "homepageSchemaScan": { "status": "WARNING", "details": "missing Organization schema" },
        "reviewSitesScan": null,
        "llmsSettings": {
            "url": "https://acme.com/llms.txt",
            "productsEnabled": true,
            "pagesEnabled": false,
        },
        "githubSettings": { "url": "https://github.com/acme/llms" },
        "onboarded": true,
        "queriesAddedThisMonth": 7,
        "topics": ["running shoes", "trail shoes"],
        "billingPlanStatus": "ACTIVE",
        "billingSubscriptionId": "sub_123",
        "billingPlanHandle": "pro",
        "billingUpdatedAt": millis(1_700_000_300_000),
    }
}

/// An organisation carrying only its identity
pub fn minimal_organisation(hex: &str) -> Document {
    doc! { "_id": oid(hex) }
}

pub fn query_with_orgs(orgs: Vec<Bson>) -> Document {
    doc! {
        "_id": oid(QUERY_HEX),
        "prompt": "best trail running shoes",
        "platform": "Perplexity",
        "trackingOrgs": orgs,
        "citations": [
            {
                "brandName": "Acme",
                "brandDomain": "acme.com",
                "link": "https://acme.com/trail",
                "linkText": "Acme Trail",
                "position": 1,
            },
            { "brandName": "Other", "link": "https://other.com", "position": 0 },
        ],
    }
}

pub fn llms_with_org(org: Bson) -> Document {
    doc! {
        "_id": oid(LLMS_HEX),
        "org": org,
        "domain": "acme.com",
        "totalHits": 42,
        "totalLinks": 120,
        "generatedFile": "# Acme\n> Trail running gear",
        "createdAt": millis(1_700_000_000_000),
        "lastHit": millis(1_700_000_400_000),
    }
}
