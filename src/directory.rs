//! Directory
//!
//! Employee and customer reference data. Logging in is nothing more than an
//! employee-code lookup; there is no real authentication.

/// A sales employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Employee display name.
    pub name: String,

    /// Employee code used to log in.
    pub code: String,
}

/// A known customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Customer code.
    pub code: String,

    /// Customer display name.
    pub name: String,
}

/// Static employee and customer lookup tables.
#[derive(Debug, Clone)]
pub struct Directory {
    employees: Vec<Employee>,
    customers: Vec<Customer>,
}

impl Directory {
    /// Create a directory from arbitrary employee and customer lists.
    pub fn new(employees: impl Into<Vec<Employee>>, customers: impl Into<Vec<Customer>>) -> Self {
        Directory {
            employees: employees.into(),
            customers: customers.into(),
        }
    }

    /// The standard directory shipped with the tool.
    pub fn standard() -> Self {
        Directory {
            employees: standard_employees(),
            customers: standard_customers(),
        }
    }

    /// All employees.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// All customers.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Look up an employee by code. The code is trimmed, then matched exactly.
    pub fn employee_by_code(&self, code: &str) -> Option<&Employee> {
        let code = code.trim();

        self.employees.iter().find(|employee| employee.code == code)
    }

    /// Look up a customer by code, trimmed and case-insensitive.
    pub fn customer_by_code(&self, code: &str) -> Option<&Customer> {
        let code = code.trim().to_lowercase();

        self.customers
            .iter()
            .find(|customer| customer.code.to_lowercase() == code)
    }
}

impl Default for Directory {
    fn default() -> Self {
        Directory::standard()
    }
}

fn standard_employees() -> Vec<Employee> {
    [
        ("Huynh Thi To Trinh", "20045852"),
        ("Ly Minh Dat", "20044677"),
        ("Nguyen Thi Hong Cam", "20044676"),
        ("Huynh Van Thanh Huyen", "20043742"),
        ("Le Huu Phuc", "20043750"),
        ("Truong Hoang Du", "20042514"),
        ("Ngo Thi Thuy Quynh", "20043683"),
        ("Huynh Hoang Hon", "20046380"),
        ("Phan Viet Linh", "20043741"),
    ]
    .into_iter()
    .map(|(name, code)| Employee {
        name: name.to_string(),
        code: code.to_string(),
    })
    .collect()
}

fn standard_customers() -> Vec<Customer> {
    [
        ("KH001", "Công Ty Dược Phẩm ABC"),
        ("KH002", "Nhà Thuốc An Khang"),
        ("KH003", "Bệnh Viện Hữu Nghị"),
        ("KH004", "Công Ty TNHH Dược Phẩm XYZ"),
        ("NT-LONGCHAU-01", "Nhà Thuốc FPT Long Châu 1"),
        ("HCM-0123", "Bệnh viện Chợ Rẫy"),
    ]
    .into_iter()
    .map(|(code, name)| Customer {
        code: code.to_string(),
        name: name.to_string(),
    })
    .collect()
}
