use std::{path::PathBuf, process::ExitCode, sync::Arc};

use admin_core::{
    form::FormController,
    options::{load_category_options, status_options},
    product::ProductSchema,
    AddProductForm, AuthSession, CatalogApi, CategoryField, EditCategoryForm, EditProductForm,
    FormField, HttpCatalogApi, LoginForm, Photo, ProductField, ProductSubmission,
    SubmitError, ValidationErrors,
};
use anyhow::{anyhow, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use shared::domain::{CategoryId, ProductId};
use tracing::info;

mod config;

use config::{load_settings, DEFAULT_CONFIG_PATH};

#[derive(Parser, Debug)]
#[command(about = "Manage catalog products and categories")]
struct Args {
    /// Overrides the api url from config and environment.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[arg(long, requires = "password")]
    email: Option<String>,
    #[arg(long, requires = "email")]
    password: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List categories available to products.
    Categories,
    /// Create a product and upload its photos.
    AddProduct {
        #[command(flatten)]
        fields: ProductFields,
        /// Image file to attach; repeat for several photos.
        #[arg(long = "photo")]
        photos: Vec<PathBuf>,
    },
    /// Change fields of an existing product.
    EditProduct {
        #[arg(long)]
        id: i64,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Change the title or description of a category.
    EditCategory {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(ClapArgs, Debug, Default)]
struct ProductFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    quantity: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    published: Option<bool>,
}

impl ProductFields {
    fn apply(self, form: &mut FormController<ProductSchema>) -> Result<()> {
        let text_fields = [
            (ProductField::Title, self.title),
            (ProductField::Category, self.category),
            (ProductField::Description, self.description),
            (ProductField::Price, self.price),
            (ProductField::Quantity, self.quantity),
            (ProductField::Status, self.status),
        ];
        for (field, value) in text_fields {
            if let Some(value) = value {
                form.set_field(field, value)?;
                form.set_touched(field);
            }
        }
        if let Some(published) = self.published {
            form.set_field(ProductField::Published, published)?;
        }
        Ok(())
    }
}

fn print_errors<F: FormField>(errors: &ValidationErrors) {
    for field in F::ALL {
        if let Some(message) = errors.field(*field) {
            eprintln!("  {}: {message}", field.name());
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let mut settings = load_settings(&args.config)?;
    if let Some(api_url) = args.api_url.clone() {
        settings.api_url = api_url;
    }
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();

    let session = AuthSession::new();
    let api = Arc::new(HttpCatalogApi::with_timeout(
        &settings.api_url,
        session.clone(),
        settings.request_timeout(),
    )?);

    if let (Some(email), Some(password)) = (args.email, args.password) {
        let mut login = LoginForm::new();
        login.set_email(email);
        login.set_password(password);
        let signed_in = match login.begin_submit() {
            Some(request) => {
                if let Some(pending) = login.pending_message() {
                    println!("{pending}");
                }
                let result = api.login(&request.email, &request.password).await;
                login.finish_submit(result, &session).await
            }
            None => None,
        };
        match signed_in {
            Some(route) => info!("cli: signed in, next route={}", route.path()),
            None => {
                eprintln!("{}", login.error().unwrap_or("Login failed"));
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    let outcome = match args.command {
        Command::Categories => list_categories(&*api).await,
        Command::AddProduct { fields, photos } => add_product(api, fields, photos).await,
        Command::EditProduct { id, fields } => edit_product(&*api, id, fields).await,
        Command::EditCategory {
            id,
            title,
            description,
        } => edit_category(&*api, id, title, description).await,
    };

    session.logout().await;
    outcome
}

async fn list_categories(api: &dyn CatalogApi) -> Result<ExitCode> {
    let categories = api.fetch_categories().await?;
    for category in categories {
        println!(
            "{}\t{}\t{}",
            category.id,
            category.title,
            category.updated_at.format("%m/%d/%Y")
        );
    }
    Ok(ExitCode::SUCCESS)
}

async fn add_product(
    api: Arc<HttpCatalogApi>,
    fields: ProductFields,
    photo_paths: Vec<PathBuf>,
) -> Result<ExitCode> {
    let category_options = load_category_options(&*api).await;
    if let Some(category) = &fields.category {
        if !category_options.is_empty() && !category_options.iter().any(|o| &o.value == category) {
            let known: Vec<_> = category_options.iter().map(|o| o.value.as_str()).collect();
            eprintln!("unknown category '{category}', expected one of: {}", known.join(", "));
            return Ok(ExitCode::FAILURE);
        }
    }

    let mut photos = Vec::with_capacity(photo_paths.len());
    for path in &photo_paths {
        photos.push(Photo::from_path(path).await?);
    }

    let mut form = AddProductForm::new();
    fields.apply(form.controller_mut())?;
    form.set_photos(photos);

    let pipeline = ProductSubmission::new(api);
    match form.submit(&pipeline).await {
        Ok(submitted) => {
            println!(
                "created product {}; next: {}",
                submitted.product_id,
                submitted.navigate_to.path()
            );
            for report in submitted.uploads.settle().await {
                let state = if report.is_uploaded() { "uploaded" } else { "failed" };
                println!("  photo {}: {state}", report.filename);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(SubmitError::Invalid(errors)) => {
            eprintln!("product is invalid:");
            print_errors::<ProductField>(&errors);
            let statuses: Vec<_> = status_options().into_iter().map(|o| o.value).collect();
            eprintln!("  (status is one of: {})", statuses.join(", "));
            Ok(ExitCode::from(2))
        }
        Err(err) => {
            eprintln!("{}", form.submit_error().unwrap_or("Something went wrong.."));
            Err(anyhow::Error::new(err).context("failed to create product"))
        }
    }
}

async fn edit_product(api: &dyn CatalogApi, id: i64, fields: ProductFields) -> Result<ExitCode> {
    let product_id = ProductId(id);
    let product = api
        .fetch_product(product_id)
        .await
        .with_context(|| format!("failed to load product {product_id}"))?;

    let mut form = EditProductForm::new(&product);
    fields.apply(form.controller_mut())?;
    let draft = match form.submit(|draft| draft) {
        Ok(draft) => draft,
        Err(errors) => {
            eprintln!("product is invalid:");
            print_errors::<ProductField>(&errors);
            return Ok(ExitCode::from(2));
        }
    };

    api.update_product(product_id, &draft.payload())
        .await
        .with_context(|| format!("failed to update product {product_id}"))?;
    println!("updated product {product_id}");
    Ok(ExitCode::SUCCESS)
}

async fn edit_category(
    api: &dyn CatalogApi,
    id: i64,
    title: Option<String>,
    description: Option<String>,
) -> Result<ExitCode> {
    let category_id = CategoryId(id);
    let current = api
        .fetch_categories()
        .await?
        .into_iter()
        .find(|category| category.id == category_id)
        .ok_or_else(|| anyhow!("category {category_id} not found"))?;

    let mut form = EditCategoryForm::new(current.title, current.description);
    if let Some(title) = title {
        form.controller_mut().set_field(CategoryField::Title, title)?;
    }
    if let Some(description) = description {
        form.controller_mut()
            .set_field(CategoryField::Description, description)?;
    }

    let draft = match form.submit(|draft| draft) {
        Ok(draft) => draft,
        Err(errors) => {
            eprintln!("category is invalid:");
            print_errors::<CategoryField>(&errors);
            return Ok(ExitCode::from(2));
        }
    };

    api.update_category(category_id, &draft.payload())
        .await
        .with_context(|| format!("failed to update category {category_id}"))?;
    println!("updated category {category_id}");
    Ok(ExitCode::SUCCESS)
}
