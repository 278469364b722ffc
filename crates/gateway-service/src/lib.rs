//! # gateway-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

// Re-export commonly used types
pub use dto::{
    ApplicationResponse, ChangeEmailRequest, ChangePasswordRequest, CreateApplicationRequest,
    HealthResponse, ReadinessResponse, RegisterRequest, SignInRequest, UpdateProfileRequest,
    UserEnvelope, UserResponse,
};
pub use services::{
    AccountService, ApplicationService, AuthService, AuthTokens, IssuedSession, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, SessionService,
};
