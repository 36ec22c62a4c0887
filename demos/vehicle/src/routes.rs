//! The vehicle example service.

use quark::http::{Console, HttpResponse, ParamKind, Procedure};
use quark::core::QuarkResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub name: String,
    pub title: String,
    pub index: i64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct VehicleOwner {
    vin: String,
    name: String,
    admin: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct OwnerPatch {
    name: String,
    admin: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Education {
    #[serde(rename = "Type")]
    kind: String,
    school_name: String,
    from: String,
    to: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Profile {
    name: String,
    corp: String,
    education: Vec<Education>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct World {
    oceans: Vec<String>,
    continents: Vec<String>,
    air: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct TryItRequest {
    hello: String,
    world: World,
}

/// Returns every procedure of the root service.
pub fn procedures() -> Vec<Procedure> {
    vec![
        Procedure::new("Vehicle_Vin", |console: Console| async move { console.json("Vehicle_Vin") }),
        Procedure::new("Vehicle_vins", vehicle_by_vin).param(ParamKind::String),
        Procedure::new("Users", |console: Console| async move { console.json(&Vec::<User>::new()) }),
        Procedure::new("GET_Vehicle_groupId_vin", get_vehicle)
            .params(&[ParamKind::Integer, ParamKind::String]),
        Procedure::new("PATCH_Vehicle_groupId_vin", patch_vehicle)
            .params(&[ParamKind::Integer, ParamKind::String])
            .with_body(),
        Procedure::new("Hello_World", |console: Console| async move { console.json("hello world!") }),
        Procedure::new("JsonResponse", json_response),
        Procedure::new("InternalServerError", |console: Console| async move {
            Err(console.halt(500, "internal_server_error"))
        }),
        Procedure::new("Panic", |_console: Console| async move {
            if std::hint::black_box(true) {
                panic!("baga");
            }
            Ok(HttpResponse::empty())
        }),
        Procedure::new("Full_Parameters_pathv_type_TryIt", try_it)
            .params(&[ParamKind::String, ParamKind::Integer])
            .with_body(),
        Procedure::new("NoRequestButWithBody", |console: Console| async move {
            Ok(HttpResponse::json_bytes(console.body().to_vec(), "application/octet-stream"))
        }),
    ]
}

async fn vehicle_by_vin(console: Console) -> QuarkResult<HttpResponse> {
    let vin = console.args().str(0)?;
    console.json(&format!("Vehicle_vin as string, {vin}"))
}

async fn get_vehicle(console: Console) -> QuarkResult<HttpResponse> {
    let group_id = console.args().int(0)?;
    let vin = console.args().str(1)?;
    tracing::info!(group_id, vin, "GET_Vehicle_groupId_vin");
    console.json(&VehicleOwner {
        vin: vin.to_string(),
        ..VehicleOwner::default()
    })
}

async fn patch_vehicle(console: Console) -> QuarkResult<HttpResponse> {
    let patch: OwnerPatch = console.json_body()?;
    let group_id = console.args().int(0)?;
    tracing::info!(group_id, name = %patch.name, admin = %patch.admin, "PATCH_Vehicle_groupId_vin");
    Ok(HttpResponse::empty())
}

async fn json_response(console: Console) -> QuarkResult<HttpResponse> {
    let profile = Profile {
        name: "dovejb".to_string(),
        corp: "abc".to_string(),
        education: vec![
            Education {
                kind: "elementary".to_string(),
                school_name: "panda school".to_string(),
                from: "2018".to_string(),
                to: "2021".to_string(),
            },
            Education::default(),
        ],
    };
    console.json(&profile)
}

async fn try_it(console: Console) -> QuarkResult<HttpResponse> {
    let pathv = console.args().str(0)?;
    let kind = console.args().int(1)?;
    let query = console.request().query();
    let value = query.get_int("Value")?.unwrap_or_default();
    let price = query.get_float("Price")?.unwrap_or_default();
    let message = query.get("Message").unwrap_or_default();
    let req: TryItRequest = console.json_body()?;

    tracing::debug!(
        pathv,
        kind,
        value,
        price,
        message,
        hello = %req.hello,
        oceans = req.world.oceans.len(),
        continents = req.world.continents.len(),
        air = %req.world.air,
        "TryIt"
    );

    console.json(&[User {
        name: pathv.to_string(),
        title: message.to_string(),
        index: kind + value,
    }])
}
