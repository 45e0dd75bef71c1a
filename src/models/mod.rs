pub mod city;
pub mod plan;
pub mod session;
pub mod trip;
