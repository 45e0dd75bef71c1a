pub mod city;
pub mod export;
pub mod health;
pub mod options;
pub mod plan;
