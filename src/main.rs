// ==========================================
// 采购后台 - 命令行入口
// ==========================================
// 用法:
//   po-backoffice template [out.csv]
//   po-backoffice preview <file.csv>
//   po-backoffice import <file.csv>
//   po-backoffice list [STATUS]
//   po-backoffice status <po_id> <STATUS>
//   po-backoffice carriers <SHIPPING_MODE>
//
// 数据库路径: PO_BACKOFFICE_DB_PATH,未设置时使用用户数据目录
// ==========================================

use anyhow::{anyhow, bail, Context, Result};
use po_backoffice::api::ImportPreviewResponse;
use po_backoffice::app::{get_default_db_path, AppState};
use po_backoffice::{logging, PoStatus};

const USAGE: &str = "用法: po-backoffice <template [out] | preview <file> | import <file> | list [STATUS] | status <po_id> <STATUS> | carriers <MODE>>";

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let command = args.next().ok_or_else(|| anyhow!(USAGE))?;

    match command.as_str() {
        "template" => cmd_template(args.next()),
        "preview" => {
            let file = args.next().ok_or_else(|| anyhow!(USAGE))?;
            let state = open_state()?;
            let preview = read_preview(&state, &file).await?;
            print_preview(&preview);
            Ok(())
        }
        "import" => {
            let file = args.next().ok_or_else(|| anyhow!(USAGE))?;
            let state = open_state()?;
            let preview = read_preview(&state, &file).await?;
            print_preview(&preview);

            let result = state.import_api.confirm_import(preview.groups).await?;
            println!("{}", result.message);
            for po_number in &result.po_numbers {
                println!("  {}", po_number);
            }
            Ok(())
        }
        "list" => {
            let status = args
                .next()
                .map(|s| s.parse::<PoStatus>().map_err(|e| anyhow!(e)))
                .transpose()?;
            let state = open_state()?;
            let orders = state.purchase_order_api.list_purchase_orders(status).await?;

            println!("共 {} 个采购单", orders.len());
            for order in &orders {
                println!(
                    "{}  {}  {}  {}  {}  数量={}  金额={:.2} {}  [{}]",
                    order.po_number,
                    order.purchase_type.label(),
                    order.supplier_name,
                    order.warehouse,
                    order.expected_delivery_date,
                    order.total_quantity,
                    order.total_price,
                    order.currency,
                    order.status.label(),
                );
            }
            Ok(())
        }
        "status" => {
            let po_id = args.next().ok_or_else(|| anyhow!(USAGE))?;
            let next = args
                .next()
                .ok_or_else(|| anyhow!(USAGE))?
                .parse::<PoStatus>()
                .map_err(|e| anyhow!(e))?;
            let state = open_state()?;
            let detail = state.purchase_order_api.update_status(&po_id, next).await?;

            println!(
                "{} → {}  运输方式: {}",
                detail.order.po_number,
                detail.status_label,
                detail.shipping_label.as_deref().unwrap_or("-")
            );
            for step in &detail.progress {
                println!("  {:<6} {:?}", step.step.label(), step.state);
            }
            Ok(())
        }
        "carriers" => {
            let mode = args.next().ok_or_else(|| anyhow!(USAGE))?;
            let state = open_state()?;
            for carrier in state.purchase_order_api.list_carriers(&mode)? {
                println!("{}", carrier);
            }
            Ok(())
        }
        other => bail!("未知命令: {}\n{}", other, USAGE),
    }
}

fn open_state() -> Result<AppState> {
    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);
    AppState::new(db_path).context("应用初始化失败")
}

fn cmd_template(out: Option<String>) -> Result<()> {
    let template = po_backoffice::importer::generate_template()?;
    match out {
        Some(path) => {
            std::fs::write(&path, template).with_context(|| format!("写入模板失败: {}", path))?;
            println!("模板已保存: {}", path);
        }
        None => print!("{}", template),
    }
    Ok(())
}

async fn read_preview(state: &AppState, file: &str) -> Result<ImportPreviewResponse> {
    Ok(state.import_api.preview_import_file(file).await?)
}

fn print_preview(preview: &ImportPreviewResponse) {
    println!(
        "数据行 {}，错误行 {}，分组 {}（可导入 {}，含错误 {}）",
        preview.total_rows,
        preview.error_rows,
        preview.groups.len(),
        preview.valid_groups,
        preview.invalid_groups,
    );

    for (idx, group) in preview.groups.iter().enumerate() {
        println!(
            "[{}] {} / {} / {} / {}  行数={} 数量={} 金额={:.2}{}",
            idx + 1,
            group.purchase_type,
            group.supplier_name,
            group.warehouse,
            group.expected_delivery_date,
            group.lines.len(),
            group.total_quantity(),
            group.total_price(),
            if group.has_errors { "  (含错误)" } else { "" },
        );
        for line in group.lines.iter().filter(|l| !l.is_valid()) {
            println!("    第 {} 行: {}", line.row_index, line.errors.join("; "));
        }
    }
}
