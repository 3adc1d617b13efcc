//
//  atlassian-client
//  cli/assets.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Assets commands

use anyhow::Result;
use clap::Args;

use crate::api::assets::{self, Object};
use crate::api::{CallContext, Telemetry};
use crate::config::Config;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ObjectCommand {
    /// Assets workspace ID
    pub workspace: String,

    /// Object ID
    pub object: String,
}

impl ObjectCommand {
    pub async fn run(
        &self,
        global: &GlobalOptions,
        config: &Config,
        ctx: &CallContext,
        telemetry: &Telemetry,
    ) -> Result<()> {
        let client = assets::Client::new(global.assets_connector(config)?, telemetry.clone());
        let (data, envelope) = client
            .object
            .get(ctx, &self.workspace, &self.object)
            .await?
            .into_parts();

        if global.json {
            println!("{}", envelope.text());
            return Ok(());
        }

        for line in render_object(&data) {
            println!("{}", line);
        }
        Ok(())
    }
}

fn render_object(object: &Object) -> Vec<String> {
    let kind = object
        .object_type
        .as_ref()
        .map(|kind| kind.name.as_str())
        .unwrap_or("-");
    let mut lines = vec![format!("{:<12} {:<16} {}", object.object_key, kind, object.label)];
    if let Some(updated) = &object.updated {
        lines.push(format!("Updated: {}", updated));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_object() {
        let object: Object = serde_json::from_str(
            r#"{"id": "88", "workspaceId": "ws-1", "globalId": "ws-1:88",
                "label": "Laptop 42", "objectKey": "ITAM-88",
                "objectType": {"id": "3", "name": "Hardware"},
                "updated": "2026-01-09T10:00:00Z"}"#,
        )
        .unwrap();

        let lines = render_object(&object);

        assert!(lines[0].starts_with("ITAM-88"));
        assert!(lines[0].contains("Hardware"));
        assert!(lines[0].ends_with("Laptop 42"));
        assert_eq!(lines[1], "Updated: 2026-01-09T10:00:00Z");
    }
}
