pub mod api_dto;
pub mod vehicle_dto;
