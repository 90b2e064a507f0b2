//! CSV exports describing one small promotion week
//!
//! Evaluated at 2024-06-08 12:00 UTC the schedule window runs from June 1 to
//! June 15. `t3_a` (owner `u`) and `t3_b` (owner `v`) are live; `t3_c` is
//! rejected and `t3_gone` has no item at all.

use promo_traffic::database::Database;
use promo_traffic::processor::{CsvImporter, ImportKind, ImportStats};
use std::path::{Path, PathBuf};

pub const ITEMS_CSV: &str = "\
item_id,owner_id,title,bid,status,promoted,created_at,promote_until,score
t3_a,u,Alpha launch,70.00,accepted,true,2024-06-02 10:15:00,2024-06-10 00:00:00,12
t3_b,v,\"Beta, now with commas\",60.00,promoted,true,2024-06-05 08:00:00,2024-06-12 00:00:00,3
t3_c,u,Rejected pitch,15.00,rejected,true,2024-06-01 00:00:00,2024-06-04 00:00:00,0
";

pub const PROMOTIONS_CSV: &str = "\
item_id,start_date,end_date
t3_a,2024-06-03,2024-06-10
t3_b,2024-06-06,2024-06-12
t3_c,2024-06-01,2024-06-04
t3_gone,2024-06-02,2024-06-05
";

pub const BIDS_CSV: &str = "\
owner_id,date,bid,refund
u,2024-06-01,70.00,0
v,2024-06-05,60.00,5.00
u,2024-06-06,15.00,15.00
";

pub const COMMUNITIES_CSV: &str = "\
name
pics
funny
";

pub const TRAFFIC_CSV: &str = "\
resolution,scope,subject_key,bucket,unique_impressions,total_impressions,unique_clicks,total_clicks,subscriptions
# promoted items
hour,thing,t3_a,2024-06-03 10:00:00,120,300,4,9,
hour,thing,t3_a,2024-06-03 11:00:00,80,150,2,3,
hour,thing,t3_a,2024-06-03 12:00:00,40,90,1,1,
day,thing,t3_a,2024-06-03,240,600,7,14,
day,thing,t3_a,2024-06-04,100,200,1,2,
day,thing,t3_b,2024-06-06,50,80,0,1,
day,promos,,2024-06-03,1000,4000,20,40,
day,promos,,2024-06-04,800,2500,10,25,
day,promos,,2024-06-06,500,1000,0,0,
# site
hour,total,,2024-06-08 00:00:00,500,900,0,0,
day,total,,2024-05-31,4000,9000,0,0,
day,total,,2024-06-01,4500,9500,0,0,
day,total,,2024-06-02,5000,11000,0,0,
month,total,,2024-05-01,90000,250000,0,0,
month,total,,2024-06-01,9500,20500,0,0,
# listings
hour,community,pics,2024-06-01 09:00:00,30,60,0,0,
day,community,pics,2024-06-01,300,700,0,0,4
day,community,pics,2024-06-02,320,650,0,0,6
hour,community,example.com,2024-06-01 09:00:00,4,9,1,2,
day,community,example.com,2024-06-01,40,90,12,20,
day,community,frontpage,2024-06-01,2000,5000,0,0,
";

/// Every fixture file in import order
pub fn fixture_files() -> [(ImportKind, &'static str, &'static str); 5] {
    [
        (ImportKind::Communities, "communities.csv", COMMUNITIES_CSV),
        (ImportKind::Items, "items.csv", ITEMS_CSV),
        (ImportKind::Promotions, "promotions.csv", PROMOTIONS_CSV),
        (ImportKind::Bids, "bids.csv", BIDS_CSV),
        (ImportKind::Traffic, "traffic.csv", TRAFFIC_CSV),
    ]
}

/// Write the fixtures into `dir`, returning each kind with its path
pub fn write_fixtures(dir: &Path) -> anyhow::Result<Vec<(ImportKind, PathBuf)>> {
    let mut written = Vec::new();
    for (kind, name, content) in fixture_files() {
        let path = dir.join(name);
        std::fs::write(&path, content)?;
        written.push((kind, path));
    }
    Ok(written)
}

/// Import every fixture into the store at `db_path`
pub fn import_fixtures(db_path: &str, dir: &Path) -> anyhow::Result<Vec<ImportStats>> {
    let mut importer = CsvImporter::new(Database::new(db_path)?, 4)?;
    let mut stats = Vec::new();
    for (kind, path) in write_fixtures(dir)? {
        stats.push(importer.import_file(kind, &path)?);
    }
    Ok(stats)
}
