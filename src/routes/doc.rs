use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{AdminInfo, LoginRequest},
        orders::{
            CheckoutItem, CheckoutRequest, OrderList, OrderWithItems, UpdateOrderStatusRequest,
            UpdatePaymentStatusRequest,
        },
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        reports::{DashboardStats, FinanceReport, FinanceStats},
    },
    models::{Order, OrderItem, Product},
    response::{ApiResponse, Meta},
    routes::{admin, auth, health, orders, params, products},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "admin_session",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("admin_session"))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::logout,
        auth::session,
        products::list_products,
        products::get_product,
        orders::checkout,
        orders::lookup_order,
        admin::list_all_orders,
        admin::get_order_admin,
        admin::update_order_status,
        admin::update_payment_status,
        admin::dashboard,
        admin::finance_report,
        admin::export_finance_csv,
        admin::list_products_admin,
        admin::create_product,
        admin::update_product,
        admin::delete_product
    ),
    components(
        schemas(
            Product,
            Order,
            OrderItem,
            AdminInfo,
            LoginRequest,
            CheckoutItem,
            CheckoutRequest,
            OrderWithItems,
            OrderList,
            UpdateOrderStatusRequest,
            UpdatePaymentStatusRequest,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            FinanceStats,
            FinanceReport,
            DashboardStats,
            params::Pagination,
            params::ProductQuery,
            params::OrderListQuery,
            health::HealthData,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<AdminInfo>,
            ApiResponse<FinanceReport>,
            ApiResponse<DashboardStats>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Public catalog endpoints"),
        (name = "Orders", description = "Checkout and order lookup"),
        (name = "Auth", description = "Admin session endpoints"),
        (name = "Admin", description = "Back-office endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
